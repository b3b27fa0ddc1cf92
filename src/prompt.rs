// src/prompt.rs

//! Renders a validated reading into the fixed prompt template sent upstream.

use super::api::{CardDraw, ReadingRequest};
use std::fmt;
use std::str::FromStr;

/// Language of the prompt template and of the reply the model is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptLocale {
    /// Traditional Chinese. Default.
    #[default]
    ZhTw,
    En,
}

/// Wording for one locale. The structure of the prompt is shared; only these
/// strings differ.
struct Template {
    persona: &'static str,
    question_heading: &'static str,
    spread_heading: &'static str,
    cards_heading: &'static str,
    directives_intro: &'static str,
    directives: [&'static str; 5],
    language_directive: &'static str,
    unspecified: &'static str,
    unspecified_spread: &'static str,
    position_label: &'static str,
    card_label: &'static str,
    orientation_label: &'static str,
    empty_answer: &'static str,
    upstream_failure: &'static str,
}

const ZH_TW: Template = Template {
    persona: "你是一位理性、溫和、有心理諮商素養的塔羅老師，幫使用者整理思緒，而不是做宿命論預言。",
    question_heading: "【提問者的問題】",
    spread_heading: "【使用的牌陣】",
    cards_heading: "【抽到的牌】",
    directives_intro: "請依照以下原則解讀：",
    directives: [
        "先用一小段話，總結此問題目前的整體氛圍。",
        "依牌陣位置，一張一張說明（牌義＋正逆位＋此位置代表的意義）。",
        "多著墨在「可行的具體建議」、可以怎麼調整心態或行動。",
        "避免宿命式語氣（例如「一定會怎樣」「註定」），改用「傾向」「比較可能」「如果你這樣做」這種表達。",
        "最後給一段 2～3 句的結語，像給朋友的中肯建議。",
    ],
    language_directive: "請用繁體中文回答，段落清楚、有小標題。",
    unspecified: "未指定",
    unspecified_spread: "未特別說明",
    position_label: "位置：",
    card_label: "牌名：",
    orientation_label: "正逆位：",
    empty_answer: "（GPT 未回傳文字內容，請檢查模型與 API 回傳格式）",
    upstream_failure: "呼叫 OpenAI 失敗",
};

const EN: Template = Template {
    persona: "You are a rational, gentle tarot reader with a background in counseling. You help the querent sort out their thoughts rather than make fatalistic predictions.",
    question_heading: "[The Querent's Question]",
    spread_heading: "[Spread Used]",
    cards_heading: "[Cards Drawn]",
    directives_intro: "Interpret the reading according to these principles:",
    directives: [
        "Open with a short paragraph summarizing the overall atmosphere around this question.",
        "Go through the cards one by one by spread position (card meaning + orientation + what the position represents).",
        "Focus on feasible, concrete suggestions: how the querent could adjust their mindset or actions.",
        "Avoid fatalistic phrasing (such as \"this will definitely happen\" or \"it is destined\"); prefer \"tends to\", \"is more likely\", \"if you do this\".",
        "Close with 2-3 sentences of honest advice, as you would give a friend.",
    ],
    language_directive: "Answer in English, with clear paragraphs and short subheadings.",
    unspecified: "unspecified",
    unspecified_spread: "unspecified",
    position_label: "Position: ",
    card_label: "Card: ",
    orientation_label: "Orientation: ",
    empty_answer: "(The model returned no text content; check the model and the API response format.)",
    upstream_failure: "Failed to call OpenAI",
};

impl PromptLocale {
    fn template(self) -> &'static Template {
        match self {
            PromptLocale::ZhTw => &ZH_TW,
            PromptLocale::En => &EN,
        }
    }

    /// Answer used when the upstream reply carries no text in any known shape.
    pub fn empty_answer(self) -> &'static str {
        self.template().empty_answer
    }

    /// Error used when an upstream failure has no message of its own.
    pub fn upstream_failure(self) -> &'static str {
        self.template().upstream_failure
    }
}

impl fmt::Display for PromptLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptLocale::ZhTw => write!(f, "zh-TW"),
            PromptLocale::En => write!(f, "en"),
        }
    }
}

impl FromStr for PromptLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zh-tw" | "zh_tw" | "zh-hant" => Ok(PromptLocale::ZhTw),
            "en" | "en-us" | "en_us" => Ok(PromptLocale::En),
            other => Err(format!("unsupported prompt locale '{other}' (expected zh-TW or en)")),
        }
    }
}

/// Formats one card as a numbered line. `index` is 1-based.
fn card_line(t: &Template, index: usize, card: &CardDraw) -> String {
    format!(
        "{}. {}{}, {}{}, {}{}",
        index,
        t.position_label,
        card.position().unwrap_or(t.unspecified),
        t.card_label,
        card.display_name().unwrap_or(t.unspecified),
        t.orientation_label,
        card.orientation().unwrap_or(t.unspecified),
    )
}

/// Builds the full prompt for a reading. Pure: the same reading and locale
/// always produce the same bytes.
pub fn build_prompt(reading: &ReadingRequest, locale: PromptLocale) -> String {
    let t = locale.template();

    let card_lines = reading
        .cards
        .iter()
        .enumerate()
        .map(|(idx, card)| card_line(t, idx + 1, card))
        .collect::<Vec<_>>()
        .join("\n");

    let directives = t
        .directives
        .iter()
        .enumerate()
        .map(|(idx, directive)| format!("{}. {}", idx + 1, directive))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\n{persona}\n\n{question_heading}\n{question}\n\n{spread_heading}\n{spread}\n\n{cards_heading}\n{card_lines}\n\n{directives_intro}\n{directives}\n\n{language}",
        persona = t.persona,
        question_heading = t.question_heading,
        question = reading.question,
        spread_heading = t.spread_heading,
        spread = reading.spread_type().unwrap_or(t.unspecified_spread),
        cards_heading = t.cards_heading,
        directives_intro = t.directives_intro,
        language = t.language_directive,
    )
}
