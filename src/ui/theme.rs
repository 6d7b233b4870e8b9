use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub keyword: Color,
    pub number: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub type_name: Color, // Cyan for type names
    pub padding_byte: Color,
    /// Cycled per field so adjacent members stay distinguishable.
    pub field_palette: [Color; 8],
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    keyword: Color::Rgb(137, 180, 250),        // Blue for keywords
    number: Color::Rgb(250, 179, 135),         // Orange for numbers
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for selection
    type_name: Color::Rgb(148, 226, 213),      // Cyan/teal for type names
    padding_byte: Color::Rgb(88, 91, 112),     // Dim slate for padding cells
    field_palette: [
        Color::Rgb(137, 180, 250), // Blue
        Color::Rgb(166, 227, 161), // Green
        Color::Rgb(250, 179, 135), // Orange
        Color::Rgb(203, 166, 247), // Mauve
        Color::Rgb(148, 226, 213), // Teal
        Color::Rgb(245, 194, 231), // Pink
        Color::Rgb(249, 226, 175), // Yellow
        Color::Rgb(243, 139, 168), // Red
    ],
};

impl Theme {
    /// Color for the member at `index`, cycling through the palette.
    pub fn field_color(&self, index: usize) -> Color {
        self.field_palette[index % self.field_palette.len()]
    }
}
