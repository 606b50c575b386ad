use super::language::TargetLanguage;

/// Common Portuguese sentences with canned translations
const PHRASES: [&str; 5] = [
    "Olá, como você está?",
    "Bom dia, tudo bem?",
    "Obrigado pela sua ajuda",
    "Por favor, pode me ajudar?",
    "Eu gosto muito deste aplicativo",
];

fn table(lang: TargetLanguage) -> Option<[&'static str; 5]> {
    match lang {
        TargetLanguage::Fr => Some([
            "Bonjour, comment allez-vous ?",
            "Bonjour, tout va bien ?",
            "Merci pour votre aide",
            "S'il vous plaît, pouvez-vous m'aider ?",
            "J'aime beaucoup cette application",
        ]),
        TargetLanguage::En => Some([
            "Hello, how are you?",
            "Good morning, is everything okay?",
            "Thank you for your help",
            "Please, can you help me?",
            "I really like this application",
        ]),
        TargetLanguage::Es => Some([
            "Hola, ¿cómo estás?",
            "Buenos días, ¿todo bien?",
            "Gracias por tu ayuda",
            "Por favor, ¿puedes ayudarme?",
            "Me gusta mucho esta aplicación",
        ]),
        TargetLanguage::De => Some([
            "Hallo, wie geht es dir?",
            "Guten Morgen, alles gut?",
            "Danke für deine Hilfe",
            "Bitte, kannst du mir helfen?",
            "Ich mag diese Anwendung sehr",
        ]),
        TargetLanguage::It => Some([
            "Ciao, come stai?",
            "Buongiorno, tutto bene?",
            "Grazie per il tuo aiuto",
            "Per favore, puoi aiutarmi?",
            "Mi piace molto questa applicazione",
        ]),
        TargetLanguage::Pt => None,
    }
}

/// Offline stand-in used when the model is unreachable
///
/// Known phrases get their canned translation, Portuguese targets echo the
/// input, anything else is echoed behind a simulation marker.
pub fn simulate_translation(text: &str, target: TargetLanguage) -> String {
    let text = text.trim();

    if target == TargetLanguage::Pt {
        return text.to_string();
    }

    let known = table(target).and_then(|translations| {
        PHRASES
            .iter()
            .position(|phrase| *phrase == text)
            .map(|i| translations[i])
    });

    match known {
        Some(translation) => translation.to_string(),
        None => format!("[Simulation mode - {}] {}", target.code(), text),
    }
}
