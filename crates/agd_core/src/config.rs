use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Digest language, threaded explicitly into every component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Russian,
    English,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Russian => "ru",
            Language::English => "en",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::Russian
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ru" | "russian" => Ok(Language::Russian),
            "en" | "english" => Ok(Language::English),
            other => Err(Error::Config(format!("unknown language: {}", other))),
        }
    }
}

/// Keyword lists driving the relevance filter and the heuristic scorer.
/// All entries are stored lowercased; matching is case-folded substring
/// containment over title+summary text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordConfig {
    pub relevance: Vec<String>,
    pub high_impact: Vec<String>,
    pub commodity: Vec<String>,
}

const RELEVANCE_EN: &[&str] = &[
    "agriculture",
    "farming",
    "crop",
    "livestock",
    "dairy",
    "poultry",
    "wheat",
    "corn",
    "soybean",
    "rice",
    "cotton",
    "sugar",
    "coffee",
    "fertilizer",
    "pesticide",
    "irrigation",
    "harvest",
    "planting",
    "food security",
    "sustainable farming",
    "organic",
    "precision agriculture",
    "agtech",
    "farm equipment",
    "tractor",
    "seed",
    "grain",
    "feed",
    "commodity",
    "market price",
    "export",
    "import",
    "trade",
];

const RELEVANCE_RU: &[&str] = &[
    "сельское хозяйство",
    "фермерство",
    "урожай",
    "скот",
    "молочное",
    "птицеводство",
    "пшеница",
    "кукуруза",
    "соя",
    "рис",
    "хлопок",
    "сахар",
    "кофе",
    "удобрение",
    "пестицид",
    "орошение",
    "сбор урожая",
    "посадка",
    "продовольственная безопасность",
    "устойчивое земледелие",
    "органическое",
    "точное земледелие",
    "агротех",
    "сельхозтехника",
    "трактор",
    "семена",
    "зерно",
    "корм",
    "товар",
    "рыночная цена",
    "экспорт",
    "импорт",
    "торговля",
];

// High-impact and commodity sets are bilingual in both modes: sources mix
// Russian and English coverage regardless of the digest language.
const HIGH_IMPACT: &[&str] = &[
    "цена", "price", "рост", "rise", "падение", "fall", "кризис", "crisis", "экспорт", "export",
    "импорт", "import", "торговля", "trade", "засуха", "drought", "наводнение", "flood", "погода",
    "weather", "политика", "policy", "закон", "law", "регулирование", "regulation",
];

const COMMODITY: &[&str] = &[
    "пшеница", "wheat", "кукуруза", "corn", "соя", "soybean", "рис", "rice", "ячмень", "barley",
    "рожь", "rye", "овес", "oats", "хлопок", "cotton",
];

fn to_owned_list(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl KeywordConfig {
    /// Default keyword sets for a digest language. The Russian variant keeps
    /// the English relevance terms as well since several sources publish in
    /// both languages.
    pub fn for_language(language: Language) -> Self {
        let relevance = match language {
            Language::Russian => {
                let mut words = to_owned_list(RELEVANCE_RU);
                words.extend(to_owned_list(&RELEVANCE_EN[..13]));
                words
            }
            Language::English => to_owned_list(RELEVANCE_EN),
        };
        Self {
            relevance,
            high_impact: to_owned_list(HIGH_IMPACT),
            commodity: to_owned_list(COMMODITY),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.relevance.is_empty() {
            return Err(Error::Config("relevance keyword list is empty".to_string()));
        }
        Ok(())
    }
}

/// Ordered mapping from `source` substrings to flat credibility bonuses.
/// The first matching entry wins; entries never stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceCredibility(pub Vec<(String, u32)>);

impl Default for SourceCredibility {
    fn default() -> Self {
        Self(
            [
                ("fastmarkets", 5),
                ("apk", 4),
                ("margin", 4),
                ("eldala", 3),
                ("amis", 3),
            ]
            .iter()
            .map(|(name, bonus)| (name.to_string(), *bonus))
            .collect(),
        )
    }
}

impl SourceCredibility {
    pub fn bonus_for(&self, source: &str) -> u32 {
        let source = source.to_lowercase();
        self.0
            .iter()
            .find(|(needle, _)| source.contains(needle.as_str()))
            .map(|(_, bonus)| *bonus)
            .unwrap_or(0)
    }
}

/// One topic bucket: a display label and the keywords that route into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    pub label: String,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(label: &str, keywords: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            keywords: to_owned_list(keywords),
        }
    }
}

/// Ordered category list; the first rule whose keywords match wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub categories: Vec<CategoryRule>,
    pub fallback_label: String,
}

const CROP_KEYWORDS: &[&str] = &[
    "crop", "wheat", "corn", "soybean", "rice", "cotton", "sugar", "coffee", "grain", "seed",
    "harvest", "planting", "пшеница", "кукуруза", "соя", "рис", "хлопок", "сахар", "зерно",
    "семена", "урожай", "посевная",
];

const LIVESTOCK_KEYWORDS: &[&str] = &[
    "livestock", "cattle", "pig", "poultry", "chicken", "dairy", "milk", "beef", "pork", "sheep",
    "goat", "скот", "свиновод", "птицевод", "молоко", "молочн", "говядина", "баранина",
];

const TECH_KEYWORDS: &[&str] = &[
    "technology",
    "agtech",
    "precision",
    "drone",
    "artificial intelligence",
    "automation",
    "digital",
    "smart farming",
    "технолог",
    "дрон",
    "цифров",
    "автоматизац",
    "агротех",
];

const MARKET_KEYWORDS: &[&str] = &[
    "market", "price", "commodity", "trade", "export", "import", "futures", "trading", "supply",
    "demand", "рынок", "цена", "торгов", "экспорт", "импорт", "фьючерс", "спрос", "предложение",
];

const POLICY_KEYWORDS: &[&str] = &[
    "policy",
    "regulation",
    "government",
    "subsidy",
    "law",
    "bill",
    "congress",
    "senate",
    "usda",
    "политик",
    "регулирован",
    "правительств",
    "субсиди",
    "закон",
];

const WEATHER_KEYWORDS: &[&str] = &[
    "weather",
    "climate",
    "drought",
    "flood",
    "rain",
    "temperature",
    "environment",
    "sustainability",
    "carbon",
    "погод",
    "климат",
    "засух",
    "наводнен",
    "дожд",
    "температур",
    "эколог",
];

impl CategoryConfig {
    pub fn for_language(language: Language) -> Self {
        let labels = match language {
            Language::Russian => [
                "Зерновые и масличные",
                "Животноводство и молочная продукция",
                "Технологии и инновации",
                "Рынок и торговля",
                "Политика и регулирование",
                "Погода и экология",
                "Прочее",
            ],
            Language::English => [
                "Crops & Commodities",
                "Livestock & Dairy",
                "Technology & Innovation",
                "Market & Trade",
                "Policy & Regulation",
                "Weather & Environment",
                "Other",
            ],
        };
        Self {
            categories: vec![
                CategoryRule::new(labels[0], CROP_KEYWORDS),
                CategoryRule::new(labels[1], LIVESTOCK_KEYWORDS),
                CategoryRule::new(labels[2], TECH_KEYWORDS),
                CategoryRule::new(labels[3], MARKET_KEYWORDS),
                CategoryRule::new(labels[4], POLICY_KEYWORDS),
                CategoryRule::new(labels[5], WEATHER_KEYWORDS),
            ],
            fallback_label: labels[6].to_string(),
        }
    }
}

/// Tunables for digest assembly and rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestConfig {
    pub language: Language,
    /// Ranker cap: at most this many articles survive ranking.
    pub max_articles: usize,
    /// Formatter cap for the top-news section, independent of the ranker cap.
    pub top_news_limit: usize,
    /// Titles longer than this many characters are truncated for display.
    pub max_title_len: usize,
    /// AI summaries shorter than this are treated as unavailable.
    pub min_summary_len: usize,
    pub include_source_links: bool,
    /// Per-article bound on one summarization call.
    pub summary_timeout_secs: u64,
}

impl DigestConfig {
    pub fn for_language(language: Language) -> Self {
        Self {
            language,
            max_articles: 8,
            top_news_limit: 8,
            max_title_len: 80,
            min_summary_len: 20,
            include_source_links: true,
            summary_timeout_secs: 20,
        }
    }

    pub fn summary_timeout(&self) -> Duration {
        Duration::from_secs(self.summary_timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_articles == 0 {
            return Err(Error::Config("max_articles must be positive".to_string()));
        }
        if self.top_news_limit == 0 {
            return Err(Error::Config("top_news_limit must be positive".to_string()));
        }
        if self.max_title_len < 4 {
            return Err(Error::Config("max_title_len is too small to render titles".to_string()));
        }
        Ok(())
    }
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self::for_language(Language::default())
    }
}

/// Fetch-layer tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    pub request_timeout_secs: u64,
    pub delay_between_requests_secs: u64,
    pub max_retries: u32,
    pub max_articles_per_source: usize,
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            delay_between_requests_secs: 2,
            max_retries: 3,
            max_articles_per_source: 10,
            user_agent: "Agro Digest Bot 1.0".to_string(),
        }
    }
}

impl ScrapeConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn delay_between_requests(&self) -> Duration {
        Duration::from_secs(self.delay_between_requests_secs)
    }
}
