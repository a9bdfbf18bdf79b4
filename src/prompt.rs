//! Per-language prompt templates for the fortune backends.
//!
//! One record per supported language, resolved by table lookup with an
//! English fallback for unrecognized tags. The JSON skeleton the backends
//! are asked to fill is shared across languages, since the parser depends
//! on the exact key set.

use crate::BirthDate;
use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// A language the fortune can be generated in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[display(fmt = "ko")]
    Korean,
    /// Fallback for unrecognized tags.
    #[default]
    #[display(fmt = "en")]
    English,
    #[display(fmt = "zh")]
    Chinese,
    #[display(fmt = "es")]
    Spanish,
    #[display(fmt = "ja")]
    Japanese,
}

impl Language {
    /// Resolves a language tag, ignoring any region subtag
    /// (`"zh-CN"` resolves like `"zh"`). Unrecognized tags fall back to
    /// English.
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag.split(['-', '_']).next().unwrap_or(tag);
        match primary.to_ascii_lowercase().as_str() {
            "ko" => Self::Korean,
            "en" => Self::English,
            "zh" => Self::Chinese,
            "es" => Self::Spanish,
            "ja" => Self::Japanese,
            _ => Self::English,
        }
    }
}

/// System instruction plus user-prompt body for one language.
///
/// The body carries `{year}`, `{month}`, `{day}` and `{today}` placeholders;
/// [`PromptTemplate::render`] substitutes them and appends the shared
/// response skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    pub system: &'static str,
    pub body: &'static str,
}

impl PromptTemplate {
    /// Fills the placeholders and appends the JSON shape the backend must
    /// respond with.
    pub fn render(&self, date: &BirthDate, today: &str) -> String {
        let body = self
            .body
            .replace("{year}", &date.year().to_string())
            .replace("{month}", &date.month().to_string())
            .replace("{day}", &date.day().to_string())
            .replace("{today}", today);
        format!("{body}\n\n{RESPONSE_FORMAT}")
    }
}

/// The exact JSON shape the parser expects back; key names must not vary by
/// language.
const RESPONSE_FORMAT: &str = r#"{
  "overallFortune": "overall fortune for today (2-3 sentences)",
  "loveFortune": "love fortune (2 sentences)",
  "careerFortune": "career fortune (2 sentences)",
  "moneyFortune": "money fortune (2 sentences)",
  "healthFortune": "health fortune (2 sentences)",
  "luckyNumber": "lucky number between 1 and 9",
  "luckyColor": "lucky color",
  "luckyDirection": "lucky direction (north, south, east or west)",
  "todayAdvice": "advice for today (2-3 sentences)",
  "warningAdvice": "things to be careful about (2 sentences)",
  "overallScore": "overall score between 1 and 5",
  "loveScore": "love score between 1 and 5",
  "careerScore": "career score between 1 and 5",
  "moneyScore": "money score between 1 and 5",
  "healthScore": "health score between 1 and 5"
}"#;

const KOREAN: PromptTemplate = PromptTemplate {
    system: "당신은 한국 전통 사주학 전문가입니다. 정확하고 의미있는 운세를 제공해주세요.",
    body: "당신은 한국 전통 사주 전문가입니다. 다음 생년월일을 가진 사람의 {today} 오늘의 운세를 한국 전통 사주학을 바탕으로 분석해주세요.\n\n생년월일: {year}년 {month}월 {day}일\n오늘 날짜: {today}\n\n모든 내용은 한국어로 작성하고, 긍정적이면서도 현실적인 조언을 해주세요. 다음 형식의 JSON으로 응답해주세요:",
};

const ENGLISH: PromptTemplate = PromptTemplate {
    system: "You are an expert in traditional Korean saju fortune-telling. Provide accurate and meaningful readings.",
    body: "You are a master of traditional Korean saju. Analyze today's ({today}) fortune for a person with the birth date below, based on traditional saju principles.\n\nBirth date: {year}-{month}-{day}\nToday's date: {today}\n\nWrite everything in English, keeping the advice positive but realistic. Respond with JSON in the following shape:",
};

const CHINESE: PromptTemplate = PromptTemplate {
    system: "你是韩国传统四柱命理专家。请提供准确而有意义的运势分析。",
    body: "你是韩国传统四柱命理大师。请根据传统四柱命理学，分析出生日期如下之人{today}的今日运势。\n\n出生日期：{year}年{month}月{day}日\n今日日期：{today}\n\n所有内容请用中文书写，建议应积极而务实。请以如下格式的 JSON 回复：",
};

const SPANISH: PromptTemplate = PromptTemplate {
    system: "Eres un experto en la adivinación tradicional coreana saju. Ofrece lecturas precisas y significativas.",
    body: "Eres un maestro del saju tradicional coreano. Analiza la fortuna de hoy ({today}) para una persona con la siguiente fecha de nacimiento, según los principios tradicionales del saju.\n\nFecha de nacimiento: {day}/{month}/{year}\nFecha de hoy: {today}\n\nEscribe todo en español, con consejos positivos pero realistas. Responde con un JSON con la siguiente forma:",
};

const JAPANESE: PromptTemplate = PromptTemplate {
    system: "あなたは韓国伝統の四柱推命の専門家です。正確で意味のある運勢を提供してください。",
    body: "あなたは韓国伝統四柱推命の達人です。以下の生年月日の人の{today}の今日の運勢を、伝統的な四柱推命に基づいて分析してください。\n\n生年月日: {year}年{month}月{day}日\n今日の日付: {today}\n\nすべて日本語で書き、前向きで現実的なアドバイスをしてください。次の形式のJSONで回答してください:",
};

/// Lookup table replacing the original per-language branching.
static TEMPLATES: [(Language, PromptTemplate); 5] = [
    (Language::Korean, KOREAN),
    (Language::English, ENGLISH),
    (Language::Chinese, CHINESE),
    (Language::Spanish, SPANISH),
    (Language::Japanese, JAPANESE),
];

/// The template record for `language`; total over the enum, with the
/// English entry doubling as the table-miss fallback.
pub fn template_for(language: Language) -> &'static PromptTemplate {
    TEMPLATES
        .iter()
        .find(|(candidate, _)| *candidate == language)
        .map(|(_, template)| template)
        .unwrap_or(&ENGLISH)
}
