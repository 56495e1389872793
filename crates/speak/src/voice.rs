use {serde::Serialize, std::fmt};

/// Voice used whenever a requested one is unknown or synthesis with it fails.
pub const FALLBACK_VOICE_ID: &str = "FRzaj7L4px15biN0RGSj";

/// A speaking personality: an ElevenLabs voice plus the prompt that writes its lines.
#[derive(Debug, PartialEq, Eq)]
pub struct Voice {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub prompt: &'static str,
}

/// The public part of a [`Voice`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VoiceInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

const SHARED_BRIEF: &str = "Generate a SHORT, ANGRY, UNHINGED insult (1-2 sentences max) about someone having bad posture. It must be in ENGLISH.";

pub static VOICES: &[Voice] = &[
    Voice {
        id: FALLBACK_VOICE_ID,
        name: "Malay Barber",
        description: "A friendly Malay barber voice, warm and casual",
        prompt: "Speak with a Malay accent and slang like \"bro\", \"eh\", \"lah\", \"wan\", \"macha\". Sound like a furious barber going off about their curved back.",
    },
    Voice {
        id: "wJ5MX7uuKXZwFqGdWM4N",
        name: "Indian Tech Support/Scammer",
        description: "A confident Indian tech support voice, polite but urgent",
        prompt: "Speak like a screaming tech support agent with phrases like \"sir\", \"OK?\", \"yaar\", \"bhai\". Treat the posture as a virus that needs fixing right now.",
    },
    Voice {
        id: "ljEOxtzNoGEa58anWyea",
        name: "Chinese Karen",
        description: "A demanding Chinese Karen voice, direct and critical",
        prompt: "Speak like a demanding Karen with a Chinese accent. Be loud, repeat yourself, threaten to call the manager.",
    },
    Voice {
        id: "K8nDX2f6wjv6bCh5UeZi",
        name: "Rude French Guy",
        description: "A sarcastic rude French-accented voice, dry wit",
        prompt: "Speak like an exasperated Frenchman using \"non?\", \"mon dieu\", \"sacre bleu\". Dramatic, sarcastic, outraged.",
    },
    Voice {
        id: "nw6EIXCsQ89uJMjytYb8",
        name: "African Funny Guy",
        description: "A high-energy African-accented voice, expressive and entertaining",
        prompt: "Speak with West African slang like \"bro\", \"o\", \"wahala\", \"na so\", \"you dey craze\". High energy, wild comparisons.",
    },
    Voice {
        id: "gad8DmXGyu7hwftX9JqI",
        name: "Failed Bangalore Startup Founder",
        description: "A bitter failed Bangalore startup founder voice",
        prompt: "Speak like a bitter Bangalore founder. Lean hard on \"scene\", \"chumma\", \"come off\", \"put off\", \"macha\" and mix in startup jargon like pivot, runway and burn rate.",
    },
    Voice {
        id: "spZS54yMfsj80VHtUQFY",
        name: "Australian Construction Worker (Wants a Beer)",
        description: "An Aussie construction worker who wants a beer every hour",
        prompt: "Speak like an Aussie tradie desperate for knock off, using \"mate\", \"bloody\", \"strewth\", \"fair dinkum\", \"cold one\". Tie the insult to beer o'clock.",
    },
    Voice {
        id: "yqZhXcy5spYR7Hhv17QY",
        name: "Texan Cowboy",
        description: "A gruff, old-school Texan cowboy voice",
        prompt: "Speak with a Texan drawl using \"partner\", \"y'all\", \"ain't\", \"fixin' to\", \"dang\". Use ranch and rodeo metaphors.",
    },
];

impl Voice {
    pub fn by_id(id: &str) -> Option<&'static Voice> {
        VOICES.iter().find(|voice| voice.id == id)
    }

    pub fn random() -> &'static Voice {
        &VOICES[fastrand::usize(..VOICES.len())]
    }

    pub fn fallback() -> &'static Voice {
        &VOICES[0]
    }

    /// The voice with `id`, or a random one when the id is absent or unknown.
    pub fn resolve(id: Option<&str>) -> &'static Voice {
        id.and_then(Voice::by_id).unwrap_or_else(Voice::random)
    }

    /// Full prompt sent to the text model.
    pub fn full_prompt(&self) -> String {
        format!("{} {}", SHARED_BRIEF, self.prompt)
    }

    pub fn info(&self) -> VoiceInfo {
        VoiceInfo {
            id: self.id,
            name: self.name,
            description: self.description,
        }
    }

    pub fn all() -> Vec<VoiceInfo> {
        VOICES.iter().map(Voice::info).collect()
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
