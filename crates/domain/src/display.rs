// crates/domain/src/display.rs
//! Rendering of a count for the page: plain text or one `<img>` per digit.

use visit_counter_shared_kernel::VisitCount;

use crate::config::{Config, PLACEHOLDER};

/// Separator placed between digit images.
pub const IMAGE_SEPARATOR: &str = "&nbsp;";

/// Render `count` the way `config` asks for.
pub fn render(config: &Config, count: VisitCount) -> String {
    if config.as_image() { render_images(config, count) } else { render_text(config.visitor_text(), count) }
}

/// Substitute the grouped count into the visitor text template.
pub fn render_text(template: &str, count: VisitCount) -> String {
    template.replacen(PLACEHOLDER, &group_thousands(count.value()), 1)
}

fn render_images(config: &Config, count: VisitCount) -> String {
    let dir = config.image_dir().to_string_lossy().replace('\\', "/");
    let ext = config.image_ext();
    count
        .digits()
        .into_iter()
        .map(|digit| format!(r#"<img src="{dir}/{digit}{ext}" alt="{digit}" />"#))
        .collect::<Vec<_>>()
        .join(IMAGE_SEPARATOR)
}

/// `1234567` -> `1,234,567`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
