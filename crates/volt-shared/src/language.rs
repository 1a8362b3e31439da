use crate::vocabulary::str_vocabulary;

str_vocabulary! {
    /// Interface languages understood by the web client.
    pub enum Language {
        English = "en",
        EnglishSimplified = "en_US",
        Arabic = "ar",
        Assamese = "as",
        Azerbaijani = "az",
        Belarusian = "be",
        Bulgarian = "bg",
        Bengali = "bn",
        Breton = "br",
        Catalonian = "ca",
        Cebuano = "ceb",
        CentralKurdish = "ckb",
        Czech = "cs",
        Danish = "da",
        German = "de",
        Greek = "el",
        Spanish = "es",
        SpanishLatinAmerica = "es_419",
        Estonian = "et",
        Finnish = "fi",
        Filipino = "fil",
        French = "fr",
        Irish = "ga",
        Hindi = "hi",
        Croatian = "hr",
        Hungarian = "hu",
        Armenian = "hy",
        Indonesian = "id",
        Icelandic = "is",
        Italian = "it",
        Japanese = "ja",
        Korean = "ko",
        Luxembourgish = "lb",
        Lithuanian = "lt",
        Macedonian = "mk",
        Malay = "ms",
        NorwegianBokmal = "nb_NO",
        Dutch = "nl",
        Persian = "fa",
        Polish = "pl",
        PortugueseBrazil = "pt_BR",
        PortuguesePortugal = "pt_PT",
        Romanian = "ro",
        Russian = "ru",
        Slovak = "sk",
        Slovenian = "sl",
        Albanian = "sq",
        Serbian = "sr",
        Sinhalese = "si",
        Swedish = "sv",
        Tamil = "ta",
        Thai = "th",
        Turkish = "tr",
        Ukrainian = "uk",
        Urdu = "ur",
        Venetian = "vec",
        Vietnamese = "vi",
        ChineseSimplified = "zh_Hans",
        ChineseTraditional = "zh_Hant",
        Latvian = "lv",
        // Constructed and joke locales
        TokiPona = "tokipona",
        Esperanto = "esperanto",
        Owo = "owo",
        Pirate = "pr",
        Bottom = "bottom",
        Leet = "leet",
        PigLatin = "piglatin",
        EnchantmentTable = "enchantment",
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::English
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_locale_code() {
        assert_eq!(Language::from_raw("pt_BR"), Ok(Language::PortugueseBrazil));
        assert_eq!("enchantment".parse::<Language>(), Ok(Language::EnchantmentTable));
        assert!(Language::from_raw("pt-BR").is_err());
        assert_eq!(Language::default().as_raw(), "en");
    }

    #[test]
    fn test_all_codes_are_unique() {
        let mut codes: Vec<&str> = Language::ALL.iter().map(|l| l.as_raw()).collect();
        let total = codes.len();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), total);
        assert_eq!(total, 68);
    }
}
