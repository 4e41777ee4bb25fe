//! User-facing language for failure messages, category labels and the
//! summarization prompt.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::Operation;
use crate::types::MemoCategory;

/// Language used for everything a person reads.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Korean.
    #[default]
    Ko,
    /// English.
    En,
}

impl Locale {
    /// Generic failure message for a repository operation.
    pub fn failure_message(&self, operation: Operation) -> &'static str {
        match (self, operation) {
            (Locale::Ko, Operation::List | Operation::Get | Operation::ListByCategory) => {
                "메모를 불러오는데 실패했습니다."
            }
            (Locale::Ko, Operation::Create) => "메모 생성에 실패했습니다.",
            (Locale::Ko, Operation::Update) => "메모 수정에 실패했습니다.",
            (Locale::Ko, Operation::Delete) => "메모 삭제에 실패했습니다.",
            (Locale::Ko, Operation::Search) => "메모 검색에 실패했습니다.",
            (Locale::Ko, Operation::ClearAll) => "메모 전체 삭제에 실패했습니다.",
            (Locale::Ko, Operation::Count) => "메모 개수를 확인하는데 실패했습니다.",
            (Locale::En, Operation::List | Operation::Get | Operation::ListByCategory) => {
                "Failed to load memos."
            }
            (Locale::En, Operation::Create) => "Failed to create memo.",
            (Locale::En, Operation::Update) => "Failed to update memo.",
            (Locale::En, Operation::Delete) => "Failed to delete memo.",
            (Locale::En, Operation::Search) => "Failed to search memos.",
            (Locale::En, Operation::ClearAll) => "Failed to delete all memos.",
            (Locale::En, Operation::Count) => "Failed to count memos.",
        }
    }

    /// Display label for a category.
    pub fn category_label(&self, category: MemoCategory) -> &'static str {
        match (self, category) {
            (Locale::Ko, MemoCategory::Personal) => "개인",
            (Locale::Ko, MemoCategory::Work) => "업무",
            (Locale::Ko, MemoCategory::Study) => "학습",
            (Locale::Ko, MemoCategory::Idea) => "아이디어",
            (Locale::Ko, MemoCategory::Other) => "기타",
            (Locale::En, MemoCategory::Personal) => "Personal",
            (Locale::En, MemoCategory::Work) => "Work",
            (Locale::En, MemoCategory::Study) => "Study",
            (Locale::En, MemoCategory::Idea) => "Idea",
            (Locale::En, MemoCategory::Other) => "Other",
        }
    }

    /// Prompt asking for a summary of at most three lines in this language.
    pub fn summary_prompt(&self, content: &str) -> String {
        match self {
            Locale::Ko => format!(
                "다음 메모 내용을 한국어로 간결하게 3줄 이내로 요약해줘:\n\n{}",
                content
            ),
            Locale::En => format!(
                "Summarize the following note content concisely in English, in 3 lines or fewer:\n\n{}",
                content
            ),
        }
    }

    /// Alert text shown when the server answers a summary request with an error.
    pub fn summary_failed_alert(&self, reason: &str) -> String {
        match self {
            Locale::Ko => format!("요약에 실패했습니다: {}", reason),
            Locale::En => format!("Summarization failed: {}", reason),
        }
    }

    /// Alert text shown when a summary request could not be completed at all.
    pub fn summary_error_alert(&self) -> &'static str {
        match self {
            Locale::Ko => "요약 중 오류가 발생했습니다.",
            Locale::En => "An error occurred while summarizing.",
        }
    }

    /// Message for a memo id that does not exist.
    pub fn memo_not_found_message(&self) -> &'static str {
        match self {
            Locale::Ko => "메모를 찾을 수 없습니다.",
            Locale::En => "Memo not found.",
        }
    }

    /// Message for a request body or query that cannot be read.
    pub fn invalid_input_message(&self) -> &'static str {
        match self {
            Locale::Ko => "입력값이 올바르지 않습니다.",
            Locale::En => "Invalid input.",
        }
    }
}
