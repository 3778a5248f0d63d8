use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;

/// Chat backend a model is offered by. Static tables only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    OpenRouter,
    Anthropic,
    Google,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Premium,
    Standard,
}

impl Tier {
    /// Badge background
    pub fn badge_color(self) -> &'static str {
        match self {
            Tier::Premium => "#bb9af7",
            Tier::Standard => "#7aa2f7",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelIcon {
    Sparkles,
    Zap,
    Brain,
    Bot,
}

impl ModelIcon {
    pub fn name(self) -> &'static str {
        match self {
            ModelIcon::Sparkles => "sparkles",
            ModelIcon::Zap => "zap",
            ModelIcon::Brain => "brain",
            ModelIcon::Bot => "bot",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: ModelIcon,
    pub tier: Tier,
}

const fn model(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    icon: ModelIcon,
    tier: Tier,
) -> ModelInfo {
    ModelInfo {
        id,
        name,
        description,
        icon,
        tier,
    }
}

const OPENAI_MODELS: &[ModelInfo] = &[
    model(
        "gpt-4o",
        "GPT-4o",
        "Most capable, multimodal",
        ModelIcon::Sparkles,
        Tier::Premium,
    ),
    model(
        "gpt-4o-mini",
        "GPT-4o Mini",
        "Fast and efficient",
        ModelIcon::Zap,
        Tier::Standard,
    ),
    model(
        "gpt-4-turbo",
        "GPT-4 Turbo",
        "Previous generation flagship",
        ModelIcon::Brain,
        Tier::Premium,
    ),
    model(
        "gpt-3.5-turbo",
        "GPT-3.5 Turbo",
        "Fast and affordable",
        ModelIcon::Bot,
        Tier::Standard,
    ),
];

const OPENROUTER_MODELS: &[ModelInfo] = &[
    model(
        "anthropic/claude-3.5-sonnet",
        "Claude 3.5 Sonnet",
        "Anthropic's best",
        ModelIcon::Sparkles,
        Tier::Premium,
    ),
    model(
        "anthropic/claude-3-haiku",
        "Claude 3 Haiku",
        "Fast and efficient",
        ModelIcon::Zap,
        Tier::Standard,
    ),
    model(
        "openai/gpt-4o",
        "GPT-4o",
        "OpenAI's flagship",
        ModelIcon::Sparkles,
        Tier::Premium,
    ),
    model(
        "openai/gpt-4o-mini",
        "GPT-4o Mini",
        "Efficient GPT-4",
        ModelIcon::Zap,
        Tier::Standard,
    ),
    model(
        "meta-llama/llama-3.1-405b-instruct",
        "Llama 3.1 405B",
        "Meta's largest",
        ModelIcon::Brain,
        Tier::Premium,
    ),
    model(
        "meta-llama/llama-3.1-70b-instruct",
        "Llama 3.1 70B",
        "Balanced performance",
        ModelIcon::Bot,
        Tier::Standard,
    ),
    model(
        "google/gemini-pro-1.5",
        "Gemini Pro 1.5",
        "Google's advanced",
        ModelIcon::Sparkles,
        Tier::Premium,
    ),
    model(
        "mistralai/mixtral-8x7b-instruct",
        "Mixtral 8x7B",
        "Mixture of experts",
        ModelIcon::Brain,
        Tier::Standard,
    ),
];

const ANTHROPIC_MODELS: &[ModelInfo] = &[
    model(
        "claude-3-5-sonnet-20241022",
        "Claude 3.5 Sonnet",
        "Most capable",
        ModelIcon::Sparkles,
        Tier::Premium,
    ),
    model(
        "claude-3-haiku-20240307",
        "Claude 3 Haiku",
        "Fast and efficient",
        ModelIcon::Zap,
        Tier::Standard,
    ),
    model(
        "claude-3-opus-20240229",
        "Claude 3 Opus",
        "Most intelligent",
        ModelIcon::Brain,
        Tier::Premium,
    ),
];

const GOOGLE_MODELS: &[ModelInfo] = &[
    model(
        "gemini-1.5-pro",
        "Gemini 1.5 Pro",
        "Most capable",
        ModelIcon::Sparkles,
        Tier::Premium,
    ),
    model(
        "gemini-1.5-flash",
        "Gemini 1.5 Flash",
        "Fast and efficient",
        ModelIcon::Zap,
        Tier::Standard,
    ),
    model(
        "gemini-pro",
        "Gemini Pro",
        "Balanced performance",
        ModelIcon::Bot,
        Tier::Standard,
    ),
];

impl Provider {
    pub const ALL: [Provider; 4] = [
        Provider::OpenAi,
        Provider::OpenRouter,
        Provider::Anthropic,
        Provider::Google,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::OpenRouter => "openrouter",
            Provider::Anthropic => "anthropic",
            Provider::Google => "google",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::OpenRouter => "OpenRouter",
            Provider::Anthropic => "Anthropic",
            Provider::Google => "Google",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Provider::OpenAi => "GPT models from OpenAI",
            Provider::OpenRouter => "Many providers behind one API",
            Provider::Anthropic => "Claude models from Anthropic",
            Provider::Google => "Gemini models from Google",
        }
    }

    /// Accent colour shown next to the provider name
    pub fn color(self) -> &'static str {
        match self {
            Provider::OpenAi => "#10a37f",
            Provider::OpenRouter => "#8b5cf6",
            Provider::Anthropic => "#f97316",
            Provider::Google => "#4285f4",
        }
    }

    pub fn models(self) -> &'static [ModelInfo] {
        match self {
            Provider::OpenAi => OPENAI_MODELS,
            Provider::OpenRouter => OPENROUTER_MODELS,
            Provider::Anthropic => ANTHROPIC_MODELS,
            Provider::Google => GOOGLE_MODELS,
        }
    }

    /// Model used when a request does not name one
    pub fn default_model(self) -> &'static ModelInfo {
        match self {
            Provider::OpenAi => &OPENAI_MODELS[1],
            Provider::OpenRouter => &OPENROUTER_MODELS[0],
            Provider::Anthropic => &ANTHROPIC_MODELS[0],
            Provider::Google => &GOOGLE_MODELS[0],
        }
    }

    /// Look up a model by id, falling back to the first listed model.
    pub fn find_model(self, id: &str) -> &'static ModelInfo {
        let models = self.models();
        models.iter().find(|m| m.id == id).unwrap_or(&models[0])
    }
}

impl FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Provider::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownProvider(s.to_string()))
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_provider_has_models() {
        for provider in Provider::ALL {
            assert!(!provider.models().is_empty(), "{provider} has no models");
        }
    }

    #[test]
    fn provider_ids_round_trip() {
        for provider in Provider::ALL {
            assert_eq!(provider.id().parse::<Provider>().unwrap(), provider);
        }
        assert_eq!("OpenAI".parse::<Provider>().unwrap(), Provider::OpenAi);
        assert!(matches!(
            "mystery".parse::<Provider>(),
            Err(Error::UnknownProvider(id)) if id == "mystery"
        ));
    }

    #[test]
    fn unknown_model_falls_back_to_first() {
        let provider = Provider::Anthropic;
        assert_eq!(provider.find_model("nope").id, "claude-3-5-sonnet-20241022");
        assert_eq!(provider.find_model("claude-3-opus-20240229").tier, Tier::Premium);
    }

    #[test]
    fn default_models() {
        assert_eq!(Provider::OpenAi.default_model().id, "gpt-4o-mini");
        assert_eq!(
            Provider::OpenRouter.default_model().id,
            "anthropic/claude-3.5-sonnet"
        );
    }

    #[test]
    fn provider_accent_colours() {
        assert_eq!(Provider::OpenAi.color(), "#10a37f");
        assert_eq!(Provider::Google.color(), "#4285f4");
        for provider in Provider::ALL {
            assert!(provider.color().starts_with('#'), "{provider}");
        }
    }

    #[test]
    fn tier_badges_and_icons() {
        let flagship = Provider::OpenAi.find_model("gpt-4o");
        assert_eq!(flagship.icon, ModelIcon::Sparkles);
        assert_eq!(flagship.icon.name(), "sparkles");
        assert_eq!(flagship.tier.badge_color(), "#bb9af7");

        let mini = Provider::OpenAi.default_model();
        assert_eq!(mini.icon, ModelIcon::Zap);
        assert_eq!(mini.tier.badge_color(), "#7aa2f7");
    }
}
