//!
//! Shared cell formats for the report workbooks.
//!

///
/// Returns the eponymous cell format.
///
pub fn column_header_format() -> rust_xlsxwriter::Format {
    let format = rust_xlsxwriter::Format::new();
    let format = format.set_bold();
    let format = format.set_font_size(12);
    let format = format.set_font_color("#1E1E1E");
    let format = format.set_background_color("#EEF3FF");
    let format = format.set_align(rust_xlsxwriter::FormatAlign::Center);
    let format = format.set_border(rust_xlsxwriter::FormatBorder::None);
    format
}

///
/// Returns the eponymous cell format.
///
pub fn row_header_format() -> rust_xlsxwriter::Format {
    let format = rust_xlsxwriter::Format::new();
    let format = format.set_font_size(12);
    let format = format.set_font_color("#1E1E1E");
    let format = format.set_background_color("#DDE6FF");
    let format = format.set_align(rust_xlsxwriter::FormatAlign::Left);
    let format = format.set_border(rust_xlsxwriter::FormatBorder::None);
    format
}

///
/// Returns the eponymous cell format.
///
pub fn value_format() -> rust_xlsxwriter::Format {
    let format = rust_xlsxwriter::Format::new();
    let format = format.set_font_size(12);
    let format = format.set_font_color("#000000");
    let format = format.set_align(rust_xlsxwriter::FormatAlign::Right);
    let format = format.set_border(rust_xlsxwriter::FormatBorder::None);
    format
}

///
/// Returns the eponymous cell format.
///
pub fn percent_format() -> rust_xlsxwriter::Format {
    let format = value_format();
    let format = format.set_num_format("0.00");
    format
}
