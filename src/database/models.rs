/*!
 * Entity records for the exam content store.
 *
 * These structures map directly to database tables and provide
 * type-safe access to persisted data. Identifiers are supplied by the
 * caller (UUID strings by convention) and are immutable after creation.
 */

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Current UTC time as an RFC 3339 string, used for `created_at` stamps
fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// An exam, root of the content hierarchy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamRecord {
    /// Caller-supplied unique identifier
    pub id: String,
    /// Exam name
    pub name: String,
    /// Language code, e.g. "en"
    pub language: String,
    /// Free-form structured metadata, stored verbatim
    pub metadata: Option<Value>,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
}

impl ExamRecord {
    /// Create a new exam record, stamping the creation time
    pub fn new(id: String, name: String, language: String) -> Self {
        Self {
            id,
            name,
            language,
            metadata: None,
            created_at: now_rfc3339(),
        }
    }

    /// Attach structured metadata
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// A section of an exam (e.g. "Reading"), owned by exactly one exam
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentRecord {
    /// Caller-supplied unique identifier
    pub id: String,
    /// Identifier of the owning exam
    pub exam_id: String,
    /// Component name
    pub name: String,
    /// Number of questions this component contains
    pub total_questions: i64,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
}

impl ComponentRecord {
    /// Create a new component record under the given exam
    pub fn new(id: String, exam_id: String, name: String, total_questions: i64) -> Self {
        Self {
            id,
            exam_id,
            name,
            total_questions,
            created_at: now_rfc3339(),
        }
    }
}

/// A bank of questions within a component, identified by a globally unique code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBankRecord {
    /// Caller-supplied unique identifier
    pub id: String,
    /// Identifier of the owning component
    pub component_id: String,
    /// Bank code, unique across the whole store
    pub code: String,
    /// Number of questions this bank contains
    pub total_questions: i64,
}

impl QuestionBankRecord {
    /// Create a new question bank record under the given component
    pub fn new(id: String, component_id: String, code: String, total_questions: i64) -> Self {
        Self {
            id,
            component_id,
            code,
            total_questions,
        }
    }
}

/// One page of source material within a question bank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankPageRecord {
    /// Caller-supplied unique identifier
    pub id: String,
    /// Identifier of the owning question bank
    pub question_bank_id: String,
    /// Page index within the bank
    pub page_index: i64,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
}

impl BankPageRecord {
    /// Create a new bank page record under the given question bank
    pub fn new(id: String, question_bank_id: String, page_index: i64) -> Self {
        Self {
            id,
            question_bank_id,
            page_index,
            created_at: now_rfc3339(),
        }
    }
}

/// Source material attached to a bank page, a question, both or neither
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialRecord {
    /// Caller-supplied unique identifier
    pub id: String,
    /// Identifier of the bank page this material belongs to, if any
    pub bank_page_id: Option<String>,
    /// Identifier of the question this material belongs to, if any
    pub question_id: Option<String>,
    /// Material type tag, e.g. "text" or "audio"
    pub material_type: String,
    /// Material content
    pub value: String,
    /// Optional human-readable description
    pub description: Option<String>,
    /// Free-form structured metadata, stored verbatim
    pub metadata: Option<Value>,
    /// Rendering sequence hint among siblings (not unique)
    pub display_order: i64,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
}

impl MaterialRecord {
    /// Create a new unattached material record
    pub fn new(id: String, material_type: String, value: String, display_order: i64) -> Self {
        Self {
            id,
            bank_page_id: None,
            question_id: None,
            material_type,
            value,
            description: None,
            metadata: None,
            display_order,
            created_at: now_rfc3339(),
        }
    }

    /// Create a material record attached to a bank page
    pub fn for_page(
        id: String,
        bank_page_id: String,
        material_type: String,
        value: String,
        display_order: i64,
    ) -> Self {
        let mut record = Self::new(id, material_type, value, display_order);
        record.bank_page_id = Some(bank_page_id);
        record
    }

    /// Create a material record attached to a question
    pub fn for_question(
        id: String,
        question_id: String,
        material_type: String,
        value: String,
        display_order: i64,
    ) -> Self {
        let mut record = Self::new(id, material_type, value, display_order);
        record.question_id = Some(question_id);
        record
    }
}

/// A question on a bank page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Caller-supplied unique identifier
    pub id: String,
    /// Identifier of the owning bank page
    pub bank_page_id: String,
    /// Question type tag, e.g. "mcq" or "matching"
    pub question_type: String,
    /// Question text
    pub question_text: String,
    /// Rendering sequence hint among siblings (not unique)
    pub display_order: i64,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
}

impl QuestionRecord {
    /// Create a new question record under the given bank page
    pub fn new(
        id: String,
        bank_page_id: String,
        question_type: String,
        question_text: String,
        display_order: i64,
    ) -> Self {
        Self {
            id,
            bank_page_id,
            question_type,
            question_text,
            display_order,
            created_at: now_rfc3339(),
        }
    }
}

/// One selectable option of a question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOptionRecord {
    /// Caller-supplied unique identifier
    pub id: String,
    /// Identifier of the owning question
    pub question_id: String,
    /// Optional short label, e.g. "A"
    pub option_label: Option<String>,
    /// Option content
    pub option_value: String,
    /// Pairing target for matching-type questions
    pub match_target: Option<String>,
    /// Free-form structured metadata, stored verbatim
    pub metadata: Option<Value>,
}

impl QuestionOptionRecord {
    /// Create a new option record under the given question
    pub fn new(id: String, question_id: String, option_value: String) -> Self {
        Self {
            id,
            question_id,
            option_label: None,
            option_value,
            match_target: None,
            metadata: None,
        }
    }

    /// Attach a short label
    pub fn with_label(mut self, label: String) -> Self {
        self.option_label = Some(label);
        self
    }

    /// Attach a pairing target for matching-type questions
    pub fn with_match_target(mut self, target: String) -> Self {
        self.match_target = Some(target);
        self
    }
}

/// The correct answer of a question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// Caller-supplied unique identifier
    pub id: String,
    /// Identifier of the owning question
    pub question_id: String,
    /// Answer type tag, mirrors the question type
    pub answer_type: String,
    /// Correct answer payload; shape depends on the question type
    pub correct_answer: Value,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
}

impl AnswerRecord {
    /// Create a new answer record under the given question
    pub fn new(id: String, question_id: String, answer_type: String, correct_answer: Value) -> Self {
        Self {
            id,
            question_id,
            answer_type,
            correct_answer,
            created_at: now_rfc3339(),
        }
    }
}
