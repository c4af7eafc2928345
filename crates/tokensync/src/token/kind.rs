//! Token types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of style value a token holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenType {
    Color,
    Sizing,
    Spacing,
    BorderRadius,
    BorderWidth,
    Opacity,
    FontFamilies,
    FontWeights,
    FontSizes,
    LineHeights,
    LetterSpacing,
    ParagraphSpacing,
    Typography,
    BoxShadow,
    Border,
    Dimension,
    Number,
    Boolean,
    Text,
    #[serde(other)]
    Other,
}

impl TokenType {
    /// Infers a type from the first segment of a token name.
    ///
    /// Used for tokens that carry no explicit type. Plural and singular
    /// spellings of the common groups map to the same type.
    ///
    /// ```rust
    /// use tokensync::TokenType;
    ///
    /// assert_eq!(TokenType::infer_from_name("colors.primary"), TokenType::Color);
    /// assert_eq!(TokenType::infer_from_name("space.sm"), TokenType::Spacing);
    /// assert_eq!(TokenType::infer_from_name("brand.logo"), TokenType::Other);
    /// ```
    pub fn infer_from_name(name: &str) -> Self {
        let head = name.split('.').next().unwrap_or_default();
        match head {
            "color" | "colors" => TokenType::Color,
            "space" | "spacing" => TokenType::Spacing,
            "size" | "sizing" => TokenType::Sizing,
            "boxShadow" => TokenType::BoxShadow,
            "border" => TokenType::Border,
            "borderRadius" => TokenType::BorderRadius,
            "borderWidth" => TokenType::BorderWidth,
            "opacity" => TokenType::Opacity,
            "fontFamilies" => TokenType::FontFamilies,
            "fontWeights" => TokenType::FontWeights,
            "fontSizes" => TokenType::FontSizes,
            "lineHeights" => TokenType::LineHeights,
            "typography" => TokenType::Typography,
            "letterSpacing" => TokenType::LetterSpacing,
            "paragraphSpacing" => TokenType::ParagraphSpacing,
            _ => TokenType::Other,
        }
    }

    /// The serialized name of this type.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenType::Color => "color",
            TokenType::Sizing => "sizing",
            TokenType::Spacing => "spacing",
            TokenType::BorderRadius => "borderRadius",
            TokenType::BorderWidth => "borderWidth",
            TokenType::Opacity => "opacity",
            TokenType::FontFamilies => "fontFamilies",
            TokenType::FontWeights => "fontWeights",
            TokenType::FontSizes => "fontSizes",
            TokenType::LineHeights => "lineHeights",
            TokenType::LetterSpacing => "letterSpacing",
            TokenType::ParagraphSpacing => "paragraphSpacing",
            TokenType::Typography => "typography",
            TokenType::BoxShadow => "boxShadow",
            TokenType::Border => "border",
            TokenType::Dimension => "dimension",
            TokenType::Number => "number",
            TokenType::Boolean => "boolean",
            TokenType::Text => "text",
            TokenType::Other => "other",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
