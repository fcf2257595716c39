use plotters::style::RGBColor;

/// Chart theme configuration
pub struct ChartTheme {
    pub background_color: plotters::style::RGBAColor,
    pub text_color: plotters::style::RGBAColor,
    pub grid_color: plotters::style::RGBAColor,
    pub axis_color: plotters::style::RGBAColor,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background_color: plotters::style::RGBAColor(0, 0, 0, 0.94),
            text_color: plotters::style::RGBAColor(255, 255, 255, 0.8),
            grid_color: plotters::style::RGBAColor(255, 255, 255, 0.15),
            axis_color: plotters::style::RGBAColor(255, 255, 255, 0.8),
        }
    }
}

/// Chart style configuration
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub line_width: u32,
    pub font_size: u32,
    pub caption_size: u32,
    pub margin: u32,
    pub label_area_size: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 900,
            height: 480,
            line_width: 2,
            font_size: 15,
            caption_size: 26,
            margin: 10,
            label_area_size: 50,
        }
    }
}

/// Series colors: first repository green, second blue.
pub const REPO_COLORS: [RGBColor; 2] = [RGBColor(0x2e, 0xcc, 0x71), RGBColor(0x34, 0x98, 0xdb)];

/// Qualitative "Set3" palette for pie slices.
pub const PIE_PALETTE: [RGBColor; 12] = [
    RGBColor(0x8d, 0xd3, 0xc7),
    RGBColor(0xff, 0xff, 0xb3),
    RGBColor(0xbe, 0xba, 0xda),
    RGBColor(0xfb, 0x80, 0x72),
    RGBColor(0x80, 0xb1, 0xd3),
    RGBColor(0xfd, 0xb4, 0x62),
    RGBColor(0xb3, 0xde, 0x69),
    RGBColor(0xfc, 0xcd, 0xe5),
    RGBColor(0xd9, 0xd9, 0xd9),
    RGBColor(0xbc, 0x80, 0xbd),
    RGBColor(0xcc, 0xeb, 0xc5),
    RGBColor(0xff, 0xed, 0x6f),
];

/// Color for the repository at `index`, cycling if there are more than two.
pub fn repo_color(index: usize) -> RGBColor {
    REPO_COLORS[index % REPO_COLORS.len()]
}

/// `count` slice colors taken from [`PIE_PALETTE`] in order.
pub fn pie_colors(count: usize) -> Vec<RGBColor> {
    PIE_PALETTE.iter().copied().cycle().take(count).collect()
}
