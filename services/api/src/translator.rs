//! Canned translator
//!
//! Six supported Indian languages, each with a single canned welcome
//! phrase. Input text is ignored beyond an emptiness check in the handler;
//! an unsupported language code is a local validation error.

use serde::{Deserialize, Serialize};

/// A supported target language
#[derive(Debug, Clone, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub native: &'static str,
}

/// Request for a translation
#[derive(Debug, Clone, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub language: String,
}

/// Response for a translation
#[derive(Debug, Clone, Serialize)]
pub struct TranslateResponse {
    pub language: String,
    pub translated_text: String,
}

const LANGUAGES: [Language; 6] = [
    Language {
        code: "hindi",
        name: "Hindi",
        native: "हिन्दी",
    },
    Language {
        code: "tamil",
        name: "Tamil",
        native: "தமிழ்",
    },
    Language {
        code: "bengali",
        name: "Bengali",
        native: "বাংলা",
    },
    Language {
        code: "telugu",
        name: "Telugu",
        native: "తెలుగు",
    },
    Language {
        code: "marathi",
        name: "Marathi",
        native: "मराठी",
    },
    Language {
        code: "gujarati",
        name: "Gujarati",
        native: "ગુજરાતી",
    },
];

/// All supported languages
pub fn supported_languages() -> &'static [Language] {
    &LANGUAGES
}

/// Canned translation for a language code, `None` when unsupported
pub fn translate(_text: &str, language: &str) -> Option<&'static str> {
    match language {
        "hindi" => Some("नमस्ते! आपका भारत में स्वागत है। यहाँ की संस्कृति और व्यंजन अद्भुत हैं।"),
        "tamil" => Some(
            "வணக்கம்! இந்தியாவிற்கு உங்களை வரவேற்கிறோம். இங்கே கலாச்சாரம் மற்றும் உணவு அற்புதமானது.",
        ),
        "bengali" => Some("নমস্কার! ভারতে আপনাকে স্বাগতম। এখানকার সংস্কৃতি এবং খাবার অসাধারণ।"),
        "telugu" => Some(
            "నమస్కారం! భారతదేశానికి మిమ్మల్ని స్వాగతం. ఇక్కడ సంస్కృతి మరియు వంటకాలు అద్భుతమైనవి.",
        ),
        "marathi" => Some("नमस्कार! भारतात तुमचे स्वागत आहे. इथली संस्कृती आणि पदार्थ उत्कृष्ट आहेत."),
        "gujarati" => Some("નમસ્તે! ભારતમાં તમારું સ્વાગત છે. અહીંની સંસ્કૃતિ અને ખોરાક અદ્ભુત છે."),
        _ => None,
    }
}
