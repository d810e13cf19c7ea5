//! Localized ballot preview labels. Unknown languages fall back to English.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Label {
    BallotTitle,
    Instructions,
    VoteFor,
    SubmitBallot,
    ReviewChoices,
}

struct Phrase {
    key: Label,
    en: &'static str,
    es: &'static str,
    fr: &'static str,
}

const PHRASES: &[Phrase] = &[
    Phrase {
        key: Label::BallotTitle,
        en: "2024 General Election",
        es: "Elección General 2024",
        fr: "Élection Générale 2024",
    },
    Phrase {
        key: Label::Instructions,
        en: "Please make your selections below. You may review and change your choices before submitting.",
        es: "Por favor haga sus selecciones a continuación. Puede revisar y cambiar sus opciones antes de enviar.",
        fr: "Veuillez faire vos sélections ci-dessous. Vous pouvez réviser et modifier vos choix avant de soumettre.",
    },
    Phrase {
        key: Label::VoteFor,
        en: "Vote for ONE",
        es: "Vote por UNO",
        fr: "Votez pour UN",
    },
    Phrase {
        key: Label::SubmitBallot,
        en: "Submit Ballot",
        es: "Enviar Boleta",
        fr: "Soumettre le Bulletin",
    },
    Phrase {
        key: Label::ReviewChoices,
        en: "Review Choices",
        es: "Revisar Opciones",
        fr: "Réviser les Choix",
    },
];

/// Static phrase for `lang` ("en", "es", "fr"; region suffixes ignored).
pub fn text(lang: &str, key: Label) -> &'static str {
    let base = lang.split(['-', '_']).next().unwrap_or("en");
    let phrase = PHRASES.iter().find(|p| p.key == key);
    match (phrase, base) {
        (Some(p), "es") => p.es,
        (Some(p), "fr") => p.fr,
        (Some(p), _) => p.en,
        (None, _) => "",
    }
}

/// Heading shown on the ballot. In English the ballot's own title wins when
/// set; other languages always show their translated default.
pub fn ballot_title<'a>(lang: &str, settings_title: &'a str) -> &'a str {
    let base = lang.split(['-', '_']).next().unwrap_or("en");
    match base {
        "es" | "fr" => text(base, Label::BallotTitle),
        _ if !settings_title.trim().is_empty() => settings_title,
        _ => text("en", Label::BallotTitle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_and_fallback() {
        assert_eq!(text("es", Label::SubmitBallot), "Enviar Boleta");
        assert_eq!(text("fr-CA", Label::VoteFor), "Votez pour UN");
        assert_eq!(text("de", Label::ReviewChoices), "Review Choices");
    }

    #[test]
    fn title_precedence() {
        assert_eq!(ballot_title("en", "City Vote"), "City Vote");
        assert_eq!(ballot_title("en", "  "), "2024 General Election");
        assert_eq!(ballot_title("es", "City Vote"), "Elección General 2024");
        assert_eq!(ballot_title("xx", "City Vote"), "City Vote");
    }
}
