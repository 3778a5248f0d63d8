use std::fs;

/// Sections the renderer reads from the embedded theme
const THEME_SECTIONS: &[&str] = &["palette", "code", "headers", "inline"];

fn main() {
    // The shipped theme is compiled into the binary, so a broken one fails the build
    let theme_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", theme_path);

    let content = fs::read_to_string(theme_path).expect("Failed to read src/default_config.toml");
    let theme = match content.parse::<toml::Table>() {
        Ok(theme) => theme,
        Err(e) => panic!("src/default_config.toml is not valid TOML: {}", e),
    };

    for section in THEME_SECTIONS {
        if !theme.get(*section).is_some_and(toml::Value::is_table) {
            panic!("src/default_config.toml is missing the [{}] table", section);
        }
    }

    let header_colors = theme
        .get("headers")
        .and_then(|headers| headers.get("colors"))
        .and_then(toml::Value::as_array);
    if header_colors.is_none_or(|colors| colors.is_empty()) {
        panic!("src/default_config.toml needs a non-empty headers.colors list");
    }
}
