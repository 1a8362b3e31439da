use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::vocabulary::{int_vocabulary, str_vocabulary};

// ---------------------------------------------------------------------------
// Android
// ---------------------------------------------------------------------------

str_vocabulary! {
    /// Android client colour scheme.
    pub enum AndroidTheme {
        Revolt = "Revolt",
        Light = "Light",
        Amoled = "Amoled",
        /// Follow the system setting.
        System = "None",
        MaterialYou = "M3Dynamic",
    }
}

str_vocabulary! {
    /// How replies are started on Android.
    pub enum AndroidMessageReplyStyle {
        LongPressToReply = "None",
        SwipeToReply = "SwipeFromEnd",
        DoubleTapToReply = "DoubleTap",
    }
}

int_vocabulary! {
    /// Avatar corner radius presets.
    pub enum AndroidProfilePictureShape {
        Square = 0,
        Rounded = 15,
        Circular = 50,
    }
}

// ---------------------------------------------------------------------------
// Revite
// ---------------------------------------------------------------------------

str_vocabulary! {
    pub enum ReviteNotificationState {
        AllMessages = "all",
        MentionsOnly = "mention",
        None = "none",
        Muted = "muted",
    }
}

str_vocabulary! {
    pub enum ReviteEmojiPack {
        MutantRemix = "mutant",
        Twemoji = "twemoji",
        Openmoji = "openmoji",
        Noto = "noto",
    }
}

str_vocabulary! {
    pub enum ReviteBaseTheme {
        Light = "light",
        Dark = "dark",
    }
}

str_vocabulary! {
    pub enum ReviteFont {
        OpenSans = "Open Sans",
        OpenDyslexic = "OpenDyslexic",
        Inter = "Inter",
        AtkinsonHyperlegible = "Atkinson Hyperlegible",
        Roboto = "Roboto",
        NotoSans = "Noto Sans",
        Lato = "Lato",
        Bitter = "Bitter",
        Montserrat = "Montserrat",
        Poppins = "Poppins",
        Raleway = "Raleway",
        Ubuntu = "Ubuntu",
        ComicNeue = "Comic Neue",
        Lexend = "Lexend",
    }
}

str_vocabulary! {
    pub enum ReviteMonoFont {
        FiraCode = "Fira Code",
        RobotoMono = "Roboto Mono",
        SourceCodePro = "Source Code Pro",
        SpaceMono = "Space Mono",
        UbuntuMono = "Ubuntu Mono",
        JetbrainsMono = "JetBrains Mono",
    }
}

int_vocabulary! {
    /// Changelog posts, ranked by publication order.
    #[derive(PartialOrd, Ord)]
    pub enum ReviteChangelogEntry {
        MfaFeature = 1,
        IarReportingFeature = 2,
        DiscriminatorsFeature = 3,
    }
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// Second factor kinds offered by the login endpoint.
///
/// Unlike the other vocabularies this one never rejects input: values added
/// server-side after this crate was built come back as [`MfaMethod::Unknown`]
/// and serialize to the same raw string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MfaMethod {
    Password,
    Recovery,
    Totp,
    Unknown(String),
}

impl MfaMethod {
    pub const KNOWN: [MfaMethod; 3] = [MfaMethod::Password, MfaMethod::Recovery, MfaMethod::Totp];

    pub fn as_raw(&self) -> &str {
        match self {
            MfaMethod::Password => "Password",
            MfaMethod::Recovery => "Recovery",
            MfaMethod::Totp => "Totp",
            MfaMethod::Unknown(raw) => raw,
        }
    }

    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "Password" => MfaMethod::Password,
            "Recovery" => MfaMethod::Recovery,
            "Totp" => MfaMethod::Totp,
            other => MfaMethod::Unknown(other.to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, MfaMethod::Unknown(_))
    }
}

impl fmt::Display for MfaMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_raw())
    }
}

impl Serialize for MfaMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_raw())
    }
}

impl<'de> Deserialize<'de> for MfaMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_raw(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UnknownVariant;

    #[test]
    fn test_strict_lookup() {
        assert_eq!(AndroidTheme::from_raw("None"), Ok(AndroidTheme::System));
        assert_eq!(
            ReviteFont::from_raw("Comic Sans"),
            Err(UnknownVariant::new("ReviteFont", "Comic Sans"))
        );
        assert_eq!(
            ReviteChangelogEntry::from_raw(99).unwrap_err().to_string(),
            "\"99\" is not a valid ReviteChangelogEntry"
        );
    }

    #[test]
    fn test_tolerant_lookup_passes_raw_through() {
        assert_eq!(MfaMethod::from_raw("Totp"), MfaMethod::Totp);
        let future = MfaMethod::from_raw("WebAuthn");
        assert_eq!(future, MfaMethod::Unknown("WebAuthn".into()));
        assert_eq!(future.as_raw(), "WebAuthn");
        assert!(!future.is_known());
    }

    #[test]
    fn test_declaration_order() {
        assert_eq!(
            ReviteBaseTheme::ALL,
            &[ReviteBaseTheme::Light, ReviteBaseTheme::Dark]
        );
        assert_eq!(ReviteMonoFont::ALL.first(), Some(&ReviteMonoFont::FiraCode));
        assert_eq!(AndroidProfilePictureShape::ALL.len(), 3);
    }

    #[test]
    fn test_comparable_vocabulary_ranks_by_declaration() {
        assert!(ReviteChangelogEntry::MfaFeature < ReviteChangelogEntry::IarReportingFeature);
        assert!(
            ReviteChangelogEntry::DiscriminatorsFeature >= ReviteChangelogEntry::IarReportingFeature
        );
        assert_eq!(
            ReviteChangelogEntry::ALL.iter().max(),
            Some(&ReviteChangelogEntry::DiscriminatorsFeature)
        );
    }

    #[test]
    fn test_serde_uses_raw_values() {
        assert_eq!(
            serde_json::to_string(&ReviteFont::AtkinsonHyperlegible).unwrap(),
            "\"Atkinson Hyperlegible\""
        );
        assert_eq!(
            serde_json::from_str::<AndroidProfilePictureShape>("15").unwrap(),
            AndroidProfilePictureShape::Rounded
        );
        assert!(serde_json::from_str::<ReviteEmojiPack>("\"apple\"").is_err());

        let methods: Vec<MfaMethod> =
            serde_json::from_str(r#"["Password","Passkey"]"#).unwrap();
        assert_eq!(
            methods,
            vec![MfaMethod::Password, MfaMethod::Unknown("Passkey".into())]
        );
        assert_eq!(
            serde_json::to_string(&methods).unwrap(),
            r#"["Password","Passkey"]"#
        );
    }
}
