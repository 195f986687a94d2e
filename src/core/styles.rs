//! Output palette
//!
//! A [`StyleRole`] says what a piece of CLI output is (a plugin name, a
//! category, a disabled entry) and owns one terminal colour. The same colour
//! feeds raw ANSI text, prettytable cell specs and clap's help styles.
//! Nothing is coloured unless the caller passes `enabled`.
//!
//! ```
//! use blocks::core::styles::StyleRole;
//! assert_eq!(StyleRole::Name.paint("roundbrush", false), "roundbrush");
//! assert_eq!(StyleRole::Name.paint("roundbrush", true), "\x1b[92mroundbrush\x1b[0m");
//! ```

use clap::builder::styling::{AnsiColor, Color as ClapColor, Style};
use clap::builder::Styles;
use colored::Color;

macro_rules! roles {
    ( $( $(#[$doc:meta])* $role:ident => $color:expr ),+ $(,)? ) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        pub enum StyleRole {
            $( $(#[$doc])* $role ),+
        }

        impl StyleRole {
            pub fn color(self) -> Option<Color> {
                match self {
                    $( StyleRole::$role => $color ),+
                }
            }
        }
    };
}

roles! {
    /// Help section headers and detail keys
    Header => Some(Color::Yellow),
    /// Flags and subcommand names in help
    Literal => Some(Color::Cyan),
    /// Value names in help
    Placeholder => Some(Color::Green),
    Valid => Some(Color::Green),
    Invalid => Some(Color::Red),
    Error => Some(Color::BrightRed),
    /// Plugin names
    Name => Some(Color::BrightGreen),
    /// Category paths
    Category => Some(Color::Blue),
    /// Entries for disabled plugins
    Disabled => Some(Color::BrightBlack),
    /// Uncoloured
    Value => None,
}

impl StyleRole {
    /// SGR parameter for this role's foreground colour
    pub fn ansi_code(self) -> Option<String> {
        match self.color()? {
            Color::TrueColor { r, g, b } => Some(format!("38;2;{};{};{}", r, g, b)),
            Color::AnsiColor(index) => Some(format!("38;5;{}", index)),
            color => basic(color).map(|basic| basic.sgr.to_string()),
        }
    }

    /// `text` wrapped in this role's colour, or unchanged when disabled
    pub fn paint(self, text: &str, enabled: bool) -> String {
        match self.ansi_code().filter(|_| enabled) {
            Some(code) => format!("\x1b[{}m{}\x1b[0m", code, text),
            None => text.to_string(),
        }
    }

    /// prettytable foreground spec (`Fy`, `FK`, ...)
    pub fn to_prettytable_spec(self) -> Option<String> {
        let basic = basic(self.color()?)?;
        Some(format!("F{}", basic.table))
    }

    fn clap_style(self) -> Style {
        let ansi = self.color().and_then(basic).map(|basic| basic.clap);
        Style::new().fg_color(ansi.map(ClapColor::Ansi))
    }
}

/// One of the sixteen standard terminal colours in each output notation
struct Basic {
    sgr: u8,
    table: char,
    clap: AnsiColor,
}

fn basic(color: Color) -> Option<Basic> {
    let (sgr, table, clap) = match color {
        Color::Black => (30, 'k', AnsiColor::Black),
        Color::Red => (31, 'r', AnsiColor::Red),
        Color::Green => (32, 'g', AnsiColor::Green),
        Color::Yellow => (33, 'y', AnsiColor::Yellow),
        Color::Blue => (34, 'b', AnsiColor::Blue),
        Color::Magenta => (35, 'm', AnsiColor::Magenta),
        Color::Cyan => (36, 'c', AnsiColor::Cyan),
        Color::White => (37, 'w', AnsiColor::White),
        Color::BrightBlack => (90, 'K', AnsiColor::BrightBlack),
        Color::BrightRed => (91, 'R', AnsiColor::BrightRed),
        Color::BrightGreen => (92, 'G', AnsiColor::BrightGreen),
        Color::BrightYellow => (93, 'Y', AnsiColor::BrightYellow),
        Color::BrightBlue => (94, 'B', AnsiColor::BrightBlue),
        Color::BrightMagenta => (95, 'M', AnsiColor::BrightMagenta),
        Color::BrightCyan => (96, 'C', AnsiColor::BrightCyan),
        Color::BrightWhite => (97, 'W', AnsiColor::BrightWhite),
        Color::AnsiColor(_) | Color::TrueColor { .. } => return None,
    };
    Some(Basic { sgr, table, clap })
}

/// clap help styles built from the palette; plain when colour is off
pub fn palette_to_clap(enabled: bool) -> Styles {
    if !enabled {
        return Styles::plain();
    }

    Styles::styled()
        .header(StyleRole::Header.clap_style().bold())
        .literal(StyleRole::Literal.clap_style())
        .placeholder(StyleRole::Placeholder.clap_style())
        .valid(StyleRole::Valid.clap_style())
        .invalid(StyleRole::Invalid.clap_style())
        .error(StyleRole::Error.clap_style())
}
