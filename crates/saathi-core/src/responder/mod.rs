
use anyhow::{ensure, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Greeting the chat layer shows when a conversation opens
pub const WELCOME_MESSAGE: &str =
    "Namaste! I'm here to listen and support you. What's on your mind today?";

/// The single fixed response for crisis language, returned verbatim
pub const CRISIS_RESPONSE: &str = "I'm really concerned about you right now. \
Your life has value and you deserve support. Please reach out to AASRA at \
91-22-27546669 or talk to a trusted adult immediately. I'm here with you, \
and you don't have to face this alone.";

/// Supportive response category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseCategory {
    Crisis,
    AcademicStress,
    FamilyConflict,
    Loneliness,
    Anxiety,
    General,
}

/// A keyword rule mapping input text to a response category
///
/// Matching is substring containment against case-folded input, not word
/// matching. A keyword can therefore fire inside a longer word ("scared"
/// matches "scaredy-cat"); this mirrors the app's historical behavior and is
/// kept as a known limitation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseRule {
    pub keywords: Vec<String>,
    pub category: ResponseCategory,
    pub responses: Vec<String>,
}

impl ResponseRule {
    /// Whether any keyword occurs in the already-lowercased input
    #[must_use]
    pub fn matches(&self, normalized: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| normalized.contains(keyword.as_str()))
    }
}

/// A selected response plus the category that produced it
///
/// The category is exposed for tests and observability; the chat layer only
/// displays the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub category: ResponseCategory,
    pub text: String,
}

/// Selects one supportive response for each piece of user input
///
/// Crisis keywords are checked before everything else and short-circuit the
/// rule list. Remaining rules run in priority order, first match wins. Input
/// matching nothing gets a generic fallback chosen by the injected RNG, so a
/// seeded responder is fully deterministic.
pub struct Responder {
    crisis_keywords: Vec<String>,
    crisis_response: String,
    rules: Vec<ResponseRule>,
    fallbacks: Vec<String>,
    rng: StdRng,
}

impl Responder {
    /// Create a responder with the default rule table and an entropy seed
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create a deterministic responder for reproducible fallback selection
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let rules = default_rules();
        log::info!("Loaded {} response rules", rules.len());
        Self {
            crisis_keywords: crisis_keywords(),
            crisis_response: String::from(CRISIS_RESPONSE),
            rules,
            fallbacks: fallback_responses(),
            rng,
        }
    }

    /// Append a rule to the end of the priority order
    ///
    /// # Errors
    ///
    /// Returns an error if the rule has no keywords or no response
    /// templates; a template-less rule could never answer a match.
    pub fn add_rule(&mut self, rule: ResponseRule) -> Result<()> {
        ensure!(
            !rule.keywords.is_empty(),
            "rule must have at least one keyword"
        );
        ensure!(
            !rule.responses.is_empty(),
            "rule must have at least one response template"
        );
        log::debug!(
            "Added rule with {} keywords -> {:?}",
            rule.keywords.len(),
            rule.category
        );
        self.rules.push(rule);
        Ok(())
    }

    /// Select a response for the given input
    pub fn respond(&mut self, input: &str) -> String {
        self.respond_full(input).text
    }

    /// Select a response, keeping the category alongside the text
    pub fn respond_full(&mut self, input: &str) -> Reply {
        let normalized = input.to_lowercase();

        // Crisis detection always runs first, regardless of rule order.
        if self
            .crisis_keywords
            .iter()
            .any(|keyword| normalized.contains(keyword.as_str()))
        {
            log::warn!("Crisis language detected, returning helpline response");
            return Reply {
                category: ResponseCategory::Crisis,
                text: self.crisis_response.clone(),
            };
        }

        if let Some(rule) = self.rules.iter().find(|rule| rule.matches(&normalized)) {
            let choice = self.rng.gen_range(0..rule.responses.len());
            log::debug!("Matched rule -> {:?}", rule.category);
            return Reply {
                category: rule.category,
                text: rule.responses[choice].clone(),
            };
        }

        let choice = self.rng.gen_range(0..self.fallbacks.len());
        Reply {
            category: ResponseCategory::General,
            text: self.fallbacks[choice].clone(),
        }
    }
}

impl Default for Responder {
    fn default() -> Self {
        Self::new()
    }
}

fn crisis_keywords() -> Vec<String> {
    vec![
        String::from("suicide"),
        String::from("kill myself"),
        String::from("end it all"),
        String::from("want to die"),
        String::from("hurt myself"),
    ]
}

fn default_rules() -> Vec<ResponseRule> {
    vec![
        ResponseRule {
            keywords: vec![
                String::from("exam"),
                String::from("study"),
                String::from("marks"),
                String::from("pressure"),
            ],
            category: ResponseCategory::AcademicStress,
            responses: vec![String::from(
                "Academic pressure can feel overwhelming, especially with \
                 family expectations. Remember, your worth isn't defined by \
                 marks alone. Take breaks, practice deep breathing, and talk \
                 to someone you trust. What specific part of studying is \
                 stressing you the most?",
            )],
        },
        ResponseRule {
            keywords: vec![
                String::from("parents"),
                String::from("family"),
                String::from("fight"),
            ],
            category: ResponseCategory::FamilyConflict,
            responses: vec![String::from(
                "Family conflicts are really tough, especially when you feel \
                 misunderstood. It's natural to feel frustrated when \
                 generations see things differently. Your feelings are valid. \
                 Sometimes, small conversations can help bridge gaps. Would \
                 you like to talk about what happened?",
            )],
        },
        ResponseRule {
            keywords: vec![
                String::from("lonely"),
                String::from("alone"),
                String::from("friends"),
            ],
            category: ResponseCategory::Loneliness,
            responses: vec![String::from(
                "Feeling lonely is painful, and I want you to know that \
                 you're not actually alone - I'm here, and there are people \
                 who care about you. Building connections takes time, but \
                 you're worthy of friendship and love. What makes you feel \
                 most isolated?",
            )],
        },
        ResponseRule {
            keywords: vec![
                String::from("anxious"),
                String::from("worried"),
                String::from("scared"),
            ],
            category: ResponseCategory::Anxiety,
            responses: vec![String::from(
                "Anxiety can feel overwhelming, like your heart is racing and \
                 thoughts are spinning. Try the 5-4-3-2-1 technique: name 5 \
                 things you see, 4 you can touch, 3 you hear, 2 you smell, \
                 and 1 you taste. This helps ground you in the present \
                 moment. What's making you feel most anxious?",
            )],
        },
    ]
}

fn fallback_responses() -> Vec<String> {
    vec![
        String::from(
            "I hear you, and I want you to know that what you're feeling is \
             completely valid. Can you tell me more about what's going on?",
        ),
        String::from(
            "It sounds like you're going through something difficult right \
             now. I'm here to listen without any judgment. What's weighing \
             on your heart?",
        ),
        String::from(
            "Thank you for trusting me with your feelings. You're showing \
             real courage by reaching out. What would feel most helpful for \
             you right now?",
        ),
        String::from(
            "I can sense this is important to you. Your feelings matter, and \
             I want to understand better. Can you help me see this from your \
             perspective?",
        ),
        String::from(
            "That sounds really challenging. It takes strength to share \
             these feelings. What support do you need most right now?",
        ),
    ]
}
