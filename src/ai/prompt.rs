//! Fixed instruction prompt for digest generation.

use crate::core::locale::Locale;

/// Bumped whenever the instruction text changes so logged digests can be
/// traced back to the prompt that produced them.
pub const PROMPT_VERSION: &str = "2";

/// Instruction block placed in front of every transcript.
#[must_use]
pub fn instructions(locale: Locale) -> &'static str {
    match locale {
        Locale::Uk => {
            "Ти помічник-аналітик. Твоє завдання: прочитати лог чату і зробити стислий підсумок \
             (3-10 пунктів) українською мовою. Виділи головні теми, домовленості або важливі анонси. \
             Якщо в чаті просто флуд, так і напиши. Оформи підсумок як дайджест, який зручно \
             швидко переглянути."
        }
        Locale::En => {
            "You are an analyst assistant. Read the chat log below and write a concise summary \
             of 3-10 points in English. Highlight the main themes, agreements and important \
             announcements. If the chat is just noise, say so explicitly. Format the result as \
             a digest that is easy to skim."
        }
    }
}

/// Full prompt: instructions followed by the transcript.
///
/// An empty transcript still yields a complete prompt so the model can
/// report that nothing happened.
#[must_use]
pub fn build_prompt(locale: Locale, transcript: &str) -> String {
    format!("{}\n\n{}", instructions(locale), transcript)
}
