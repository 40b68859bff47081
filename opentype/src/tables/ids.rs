//! Numeric identifiers shared by the 'cmap' and 'name' tables, with
//! human-readable lookups. Unknown values round-trip untouched and render
//! as "Unknown".

use std::fmt;

/// Specifies the platform a 'cmap' encoding record or 'name' record was
/// authored for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlatformId(pub u16);

impl PlatformId {
    pub const UNICODE: PlatformId = PlatformId(0);
    pub const MACINTOSH: PlatformId = PlatformId(1);
    /// Deprecated.
    pub const ISO: PlatformId = PlatformId(2);
    pub const WINDOWS: PlatformId = PlatformId(3);
    pub const CUSTOM: PlatformId = PlatformId(4);

    pub fn name(self) -> &'static str {
        match self {
            PlatformId::UNICODE => "Unicode",
            PlatformId::MACINTOSH => "Macintosh",
            PlatformId::ISO => "ISO",
            PlatformId::WINDOWS => "Windows",
            PlatformId::CUSTOM => "Custom",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}):{}", self.0, self.name())
    }
}

/// A platform-specific character encoding identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EncodingId(pub u16);

impl EncodingId {
    /// The encoding's name; encoding ids only carry meaning relative to
    /// their platform.
    pub fn name(self, platform: PlatformId) -> &'static str {
        match platform {
            PlatformId::UNICODE => match self.0 {
                0 => "Unicode 1.0 semantics",
                1 => "Unicode 1.1 semantics",
                2 => "ISO/IEC 10646 semantics",
                3 => "Unicode 2.0 and onwards semantics, Unicode BMP only",
                4 => "Unicode 2.0 and onwards semantics, Unicode full repertoire",
                5 => "Unicode Variation Sequences",
                6 => "Unicode full repertoire",
                _ => "Unknown",
            },
            PlatformId::WINDOWS => match self.0 {
                0 => "Windows Symbol",
                1 => "Windows Unicode BMP",
                2 => "Windows ShiftJIS",
                3 => "Windows PRC",
                4 => "Windows Big5",
                5 => "Windows Wansung",
                6 => "Windows Johab",
                10 => "Windows Unicode UCS-4",
                _ => "Unknown",
            },
            PlatformId::MACINTOSH => match self.0 {
                0 => "Macintosh Roman",
                1 => "Macintosh Japanese",
                2 => "Macintosh Chinese (Traditional)",
                3 => "Macintosh Korean",
                4 => "Macintosh Arabic",
                5 => "Macintosh Hebrew",
                6 => "Macintosh Greek",
                7 => "Macintosh Russian",
                8 => "Macintosh RSymbol",
                9 => "Macintosh Devanagari",
                10 => "Macintosh Gurmukhi",
                11 => "Macintosh Gujarati",
                12 => "Macintosh Oriya",
                13 => "Macintosh Bengali",
                14 => "Macintosh Tamil",
                15 => "Macintosh Telugu",
                16 => "Macintosh Kannada",
                17 => "Macintosh Malayalam",
                18 => "Macintosh Sinhalese",
                19 => "Macintosh Burmese",
                20 => "Macintosh Khmer",
                21 => "Macintosh Thai",
                22 => "Macintosh Laotian",
                23 => "Macintosh Georgian",
                24 => "Macintosh Armenian",
                25 => "Macintosh Chinese (Simplified)",
                26 => "Macintosh Tibetan",
                27 => "Macintosh Mongolian",
                28 => "Macintosh Geez",
                29 => "Macintosh Slavic",
                30 => "Macintosh Vietnamese",
                31 => "Macintosh Sindhi",
                32 => "Macintosh Uninterpreted",
                _ => "Unknown",
            },
            _ => "Unknown",
        }
    }

    pub fn display(self, platform: PlatformId) -> String {
        format!("({}):{}", self.0, self.name(platform))
    }
}

/// A platform-specific language identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LanguageId(pub u16);

impl LanguageId {
    /// The language's name for the common Windows and Macintosh codes.
    pub fn name(self, platform: PlatformId) -> &'static str {
        match platform {
            PlatformId::WINDOWS => match self.0 {
                0x0401 => "Arabic (Saudi Arabia)",
                0x0404 => "Chinese (Traditional, Taiwan)",
                0x0405 => "Czech (Czech Republic)",
                0x0406 => "Danish (Denmark)",
                0x0407 => "German (Germany)",
                0x0408 => "Greek (Greece)",
                0x0409 => "English (United States)",
                0x040B => "Finnish (Finland)",
                0x040C => "French (France)",
                0x040D => "Hebrew (Israel)",
                0x040E => "Hungarian (Hungary)",
                0x0410 => "Italian (Italy)",
                0x0411 => "Japanese (Japan)",
                0x0412 => "Korean (Korea)",
                0x0413 => "Dutch (Netherlands)",
                0x0414 => "Norwegian, Bokmal (Norway)",
                0x0415 => "Polish (Poland)",
                0x0416 => "Portuguese (Brazil)",
                0x0419 => "Russian (Russia)",
                0x041B => "Slovak (Slovakia)",
                0x041D => "Swedish (Sweden)",
                0x041E => "Thai (Thailand)",
                0x041F => "Turkish (Turkey)",
                0x0422 => "Ukrainian (Ukraine)",
                0x0439 => "Hindi (India)",
                0x0804 => "Chinese (Simplified, PRC)",
                0x0809 => "English (United Kingdom)",
                0x080A => "Spanish (Mexico)",
                0x0816 => "Portuguese (Portugal)",
                0x0C0A => "Spanish (Spain, Modern Sort)",
                _ => "Unknown",
            },
            PlatformId::MACINTOSH => match self.0 {
                0 => "English",
                1 => "French",
                2 => "German",
                3 => "Italian",
                4 => "Dutch",
                5 => "Swedish",
                6 => "Spanish",
                7 => "Danish",
                8 => "Portuguese",
                9 => "Norwegian",
                10 => "Hebrew",
                11 => "Japanese",
                12 => "Arabic",
                13 => "Finnish",
                14 => "Greek",
                15 => "Icelandic",
                16 => "Maltese",
                17 => "Turkish",
                18 => "Croatian",
                19 => "Chinese (Traditional)",
                20 => "Urdu",
                21 => "Hindi",
                22 => "Thai",
                23 => "Korean",
                24 => "Lithuanian",
                25 => "Polish",
                26 => "Hungarian",
                27 => "Estonian",
                28 => "Latvian",
                32 => "Russian",
                33 => "Chinese (Simplified)",
                _ => "Unknown",
            },
            _ => "Unknown",
        }
    }

    pub fn display(self, platform: PlatformId) -> String {
        format!("({}):{}", self.0, self.name(platform))
    }
}

/// Identifies what a 'name' record's string means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NameId(pub u16);

impl NameId {
    pub const COPYRIGHT_NOTICE: NameId = NameId(0);
    pub const FONT_FAMILY_NAME: NameId = NameId(1);
    pub const FONT_SUBFAMILY_NAME: NameId = NameId(2);
    pub const UNIQUE_FONT_IDENTIFIER: NameId = NameId(3);
    pub const FONT_FULL_NAME: NameId = NameId(4);
    pub const VERSION: NameId = NameId(5);
    pub const POST_SCRIPT_NAME: NameId = NameId(6);
    pub const TRADEMARK: NameId = NameId(7);
    pub const MANUFACTURER_NAME: NameId = NameId(8);
    pub const DESIGNER_NAME: NameId = NameId(9);
    pub const DESCRIPTION: NameId = NameId(10);
    pub const URL_VENDOR: NameId = NameId(11);
    pub const URL_DESIGNER: NameId = NameId(12);
    pub const LICENSE_DESCRIPTION: NameId = NameId(13);
    pub const LICENSE_INFO_URL: NameId = NameId(14);
    pub const TYPOGRAPHIC_FAMILY_NAME: NameId = NameId(16);
    pub const TYPOGRAPHIC_SUBFAMILY_NAME: NameId = NameId(17);
    pub const COMPATIBLE_FULL: NameId = NameId(18);
    pub const SAMPLE_TEXT: NameId = NameId(19);
    pub const POST_SCRIPT_CID_FINDFONT_NAME: NameId = NameId(20);
    pub const WWS_FAMILY_NAME: NameId = NameId(21);
    pub const WWS_SUBFAMILY_NAME: NameId = NameId(22);
    pub const LIGHT_BACKGROUND_PALETTE: NameId = NameId(23);
    pub const DARK_BACKGROUND_PALETTE: NameId = NameId(24);
    pub const VARIATIONS_POST_SCRIPT_NAME_PREFIX: NameId = NameId(25);

    pub fn name(self) -> &'static str {
        match self.0 {
            0 => "Copyright notice",
            1 => "Font Family name",
            2 => "Font Subfamily name",
            3 => "Unique font identifier",
            4 => "Full font name",
            5 => "Version",
            6 => "PostScript name",
            7 => "Trademark",
            8 => "Manufacturer name",
            9 => "Designer name",
            10 => "Description of the typeface",
            11 => "URL of font vendor",
            12 => "URL of typeface designer",
            13 => "License description",
            14 => "License information URL",
            15 => "Reserved",
            16 => "Typographic Family name",
            17 => "Typographic Subfamily name",
            18 => "Compatible Full",
            19 => "Sample text",
            20 => "PostScript CID findfont name",
            21 => "WWS Family name",
            22 => "WWS Subfamily name",
            23 => "Light Background Palette",
            24 => "Dark Background Palette",
            25 => "Variations PostScript Name prefix",
            26..=255 => "Reserved for future standard",
            _ => "Font-specific name",
        }
    }
}

impl fmt::Display for NameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}):{}", self.0, self.name())
    }
}
