//! Rich help cards.
//!
//! A [`Card`] is a titled message made of named sections, with an accent color
//! and a footer. It renders to Markdown for the plain body of a Matrix message,
//! and to a colored variant used for the HTML body.

/// RGB accent color of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accent(pub u32);

impl Accent {
    /// Returns the color as `#rrggbb`.
    pub fn hex(&self) -> String {
        format!("#{:06x}", self.0 & 0x00ff_ffff)
    }
}

/// A named block of lines inside a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Heading of the section, usually prefixed by an emoji
    pub name: String,
    /// Lines of the section, rendered one per line
    pub lines: Vec<String>,
}

/// A help card sent to a player.
///
/// # Examples
///
/// ```
/// # use starguide::commands::card::{Accent, Card};
/// let card = Card::new("🚀 In Transit", "You're travelling", Accent(0xff6600))
///     .section("🎮 Available Commands", ["`/status` - Open your character panel"])
///     .footer("Enjoy the journey!");
/// assert!(card.to_markdown().contains("In Transit"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub description: String,
    pub accent: Accent,
    pub sections: Vec<Section>,
    pub footer: Option<String>,
}

impl Card {
    pub fn new(title: &str, description: &str, accent: Accent) -> Self {
        Card {
            title: title.to_owned(),
            description: description.to_owned(),
            accent,
            sections: Vec::new(),
            footer: None,
        }
    }

    /// Appends a section after the existing ones.
    pub fn section<I, S>(mut self, name: &str, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sections.push(Section {
            name: name.to_owned(),
            lines: lines.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn footer(mut self, footer: &str) -> Self {
        self.footer = Some(footer.to_owned());
        self
    }

    /// Returns the section with the given heading, if present.
    #[cfg(test)]
    pub fn get_section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.name == name)
    }

    /// Returns the section headings, in display order.
    #[cfg(test)]
    pub fn section_names(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.name.as_str()).collect()
    }

    /// Renders the card as Markdown.
    pub fn to_markdown(&self) -> String {
        self.render(&self.title, &self.description)
    }

    /// Renders the card as Markdown with the title wrapped in a Matrix
    /// `data-mx-color` font tag carrying the accent color.
    ///
    /// Title and description are HTML-escaped since they can carry game
    /// server data. Section lines are rendered as is.
    pub fn to_colored_markdown(&self) -> String {
        let title = format!(
            "<font data-mx-color=\"{}\">{}</font>",
            self.accent.hex(),
            escape_html(&self.title)
        );
        self.render(&title, &escape_html(&self.description))
    }

    fn render(&self, title: &str, description: &str) -> String {
        let mut blocks = vec![format!("### {}", title), description.to_owned()];

        blocks.extend(self.sections.iter().map(|section| {
            // Two trailing spaces force a line break in Markdown
            format!("**{}**  \n{}", section.name, section.lines.join("  \n"))
        }));

        if let Some(footer) = &self.footer {
            blocks.push(format!("> {}", footer));
        }

        blocks.join("\n\n")
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_card() -> Card {
        Card::new("📚 Title", "Description", Accent(0x9932cc))
            .section("First", ["line a", "line b"])
            .section("Second", vec!["line c".to_owned()])
            .footer("Footer text")
    }

    #[test]
    fn test_accent_hex() {
        assert_eq!(Accent(0x00ff7f).hex(), "#00ff7f");
        assert_eq!(Accent(0x4169e1).hex(), "#4169e1");
        assert_eq!(Accent(0x12).hex(), "#000012");
    }

    #[test]
    fn test_sections_keep_insertion_order() {
        assert_eq!(sample_card().section_names(), vec!["First", "Second"]);
    }

    #[test]
    fn test_get_section() {
        let card = sample_card();
        assert_eq!(card.get_section("First").unwrap().lines, vec!["line a", "line b"]);
        assert!(card.get_section("Missing").is_none());
    }

    #[test]
    fn test_to_markdown() {
        assert_eq!(
            sample_card().to_markdown(),
            "### 📚 Title\n\nDescription\n\n**First**  \nline a  \nline b\n\n**Second**  \nline c\n\n> Footer text"
        );
    }

    #[test]
    fn test_to_markdown_without_footer() {
        let card = Card::new("T", "D", Accent(0)).section("S", ["x"]);
        assert_eq!(card.to_markdown(), "### T\n\nD\n\n**S**  \nx");
    }

    #[test]
    fn test_to_colored_markdown() {
        let markdown = sample_card().to_colored_markdown();
        assert!(markdown.starts_with("### <font data-mx-color=\"#9932cc\">📚 Title</font>"));
        assert!(markdown.ends_with("> Footer text"));
    }

    #[test]
    fn test_to_colored_markdown_escapes_title_and_description() {
        let card = Card::new(
            "🏙️ Smith & Sons <Depot></font>",
            "Services at this <b>hub</b>",
            Accent(0xffa500),
        )
        .section("S", ["`/shop buy <item>`"]);
        let markdown = card.to_colored_markdown();

        assert!(markdown.starts_with(
            "### <font data-mx-color=\"#ffa500\">🏙️ Smith &amp; Sons &lt;Depot&gt;&lt;/font&gt;</font>"
        ));
        assert!(markdown.contains("Services at this &lt;b&gt;hub&lt;/b&gt;"));
        // Code spans are left for the Markdown renderer to escape
        assert!(markdown.contains("`/shop buy <item>`"));
        // The plain body stays readable
        assert!(card.to_markdown().contains("Smith & Sons <Depot>"));
    }
}
