//! Rendering options and configuration.

use crate::compare::DEFAULT_BUFFER_DISTANCE;

/// Header fields written at the top of a SOSI file.
///
/// Defaults reproduce the boilerplate of the utility-network exports this
/// tool was built for. The extent is not part of the header options; it is
/// passed to the writer separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SosiHeader {
    /// `..SOSI-VERSJON`
    pub sosi_version: String,

    /// `..SOSI-NIVÅ`
    pub sosi_level: String,

    /// `...KOORDSYS`
    pub coordinate_system: String,

    /// `...ORIGO-NØ`
    pub origin: (i64, i64),

    /// `...ENHET`
    pub unit: String,

    /// `...VERT-DATUM`
    pub vertical_datum: String,

    /// `..NGIS-ARKIV` (omitted when `None`)
    pub archive: Option<String>,

    /// `..OBJEKTKATALOG` (omitted when `None`)
    pub object_catalog: Option<String>,

    /// `..PROSESS_HISTORIE` (omitted when `None`)
    pub process_history: Option<String>,
}

impl SosiHeader {
    /// Create a header with the default boilerplate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set SOSI version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.sosi_version = version.into();
        self
    }

    /// Set SOSI level.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.sosi_level = level.into();
        self
    }

    /// Set coordinate system code.
    pub fn with_coordinate_system(mut self, code: impl Into<String>) -> Self {
        self.coordinate_system = code.into();
        self
    }

    /// Set origin.
    pub fn with_origin(mut self, north: i64, east: i64) -> Self {
        self.origin = (north, east);
        self
    }

    /// Set coordinate unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Set vertical datum.
    pub fn with_vertical_datum(mut self, datum: impl Into<String>) -> Self {
        self.vertical_datum = datum.into();
        self
    }

    /// Set archive name.
    pub fn with_archive(mut self, archive: Option<String>) -> Self {
        self.archive = archive;
        self
    }

    /// Set object catalog.
    pub fn with_object_catalog(mut self, catalog: Option<String>) -> Self {
        self.object_catalog = catalog;
        self
    }

    /// Set process history stamp.
    pub fn with_process_history(mut self, history: Option<String>) -> Self {
        self.process_history = history;
        self
    }
}

impl Default for SosiHeader {
    fn default() -> Self {
        Self {
            sosi_version: "5.0".to_string(),
            sosi_level: "3".to_string(),
            coordinate_system: "22".to_string(),
            origin: (0, 0),
            unit: "0.000001".to_string(),
            vertical_datum: "NN2000".to_string(),
            archive: Some("Ledning_Norge".to_string()),
            object_catalog: Some("FKBLedning 5.0".to_string()),
            process_history: Some(
                "202402012 - Trans (Skt2lan1.dll 1.46): fra 23 til 22".to_string(),
            ),
        }
    }
}

/// Options for the SVG visualizer.
#[derive(Debug, Clone)]
pub struct SvgOptions {
    /// Canvas width in pixels
    pub width: u32,

    /// Canvas height in pixels
    pub height: u32,

    /// Blank margin around the drawing, in pixels
    pub padding: u32,

    /// Buffer distance used for the filled patches
    pub buffer_distance: f64,

    /// Fill colour of buffers
    pub buffer_fill: String,

    /// Outline colour of buffers
    pub buffer_stroke: String,

    /// Opacity of buffer fill (0.0 - 1.0)
    pub buffer_opacity: f64,

    /// Colour of the geometries themselves
    pub geometry_stroke: String,

    /// Stroke width of geometries, in pixels
    pub line_width: f64,
}

impl SvgOptions {
    /// Create new SVG options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set canvas size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(1);
        self.height = height.max(1);
        self
    }

    /// Set padding.
    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Set buffer distance.
    pub fn with_buffer_distance(mut self, distance: f64) -> Self {
        self.buffer_distance = distance;
        self
    }

    /// Set buffer colours.
    pub fn with_buffer_colors(mut self, fill: impl Into<String>, stroke: impl Into<String>) -> Self {
        self.buffer_fill = fill.into();
        self.buffer_stroke = stroke.into();
        self
    }

    /// Set geometry colour.
    pub fn with_geometry_color(mut self, stroke: impl Into<String>) -> Self {
        self.geometry_stroke = stroke.into();
        self
    }
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            padding: 20,
            buffer_distance: DEFAULT_BUFFER_DISTANCE,
            buffer_fill: "lightblue".to_string(),
            buffer_stroke: "blue".to_string(),
            buffer_opacity: 0.5,
            geometry_stroke: "red".to_string(),
            line_width: 2.0,
        }
    }
}
