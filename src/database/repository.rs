/*!
 * Repository layer for the exam content store.
 *
 * This module provides the data-access contract over the schema:
 * create/read/update/delete per entity plus listing by parent foreign
 * key. Identifiers are caller-supplied; parent references and creation
 * timestamps are fixed at creation and not updatable. Deleting a record
 * cascades to its whole subtree.
 */

use log::debug;
use rusqlite::{params, OptionalExtension, Row};
use serde_json::Value;

use super::connection::DatabaseConnection;
use super::models::{
    AnswerRecord, BankPageRecord, ComponentRecord, ExamRecord, MaterialRecord,
    QuestionBankRecord, QuestionOptionRecord, QuestionRecord,
};
use crate::app_config::Config;
use crate::errors::{StoreError, StoreResult};

/// Repository for exam content operations
#[derive(Clone)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
}

/// Serialize an optional structured field for storage
fn json_to_sql(value: Option<&Value>) -> StoreResult<Option<String>> {
    value
        .map(serde_json::to_string)
        .transpose()
        .map_err(StoreError::from)
}

/// Serialize a required structured field for storage
fn required_json_to_sql(value: &Value) -> StoreResult<String> {
    serde_json::to_string(value).map_err(StoreError::from)
}

/// Parse an optional structured column back into a JSON value
fn json_from_sql(idx: usize, raw: Option<String>) -> rusqlite::Result<Option<Value>> {
    raw.map(|s| {
        serde_json::from_str(&s).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
    })
    .transpose()
}

/// Parse a required structured column back into a JSON value
fn required_json_from_sql(idx: usize, raw: String) -> rusqlite::Result<Value> {
    serde_json::from_str(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Map a statement's affected-row count to NotFound when nothing matched
fn require_affected(affected: usize, entity: &'static str, id: &str) -> StoreResult<()> {
    if affected == 0 {
        Err(StoreError::not_found(entity, id))
    } else {
        Ok(())
    }
}

fn map_exam_row(row: &Row) -> rusqlite::Result<ExamRecord> {
    Ok(ExamRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        language: row.get(2)?,
        metadata: json_from_sql(3, row.get(3)?)?,
        created_at: row.get(4)?,
    })
}

fn map_component_row(row: &Row) -> rusqlite::Result<ComponentRecord> {
    Ok(ComponentRecord {
        id: row.get(0)?,
        exam_id: row.get(1)?,
        name: row.get(2)?,
        total_questions: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn map_question_bank_row(row: &Row) -> rusqlite::Result<QuestionBankRecord> {
    Ok(QuestionBankRecord {
        id: row.get(0)?,
        component_id: row.get(1)?,
        code: row.get(2)?,
        total_questions: row.get(3)?,
    })
}

fn map_bank_page_row(row: &Row) -> rusqlite::Result<BankPageRecord> {
    Ok(BankPageRecord {
        id: row.get(0)?,
        question_bank_id: row.get(1)?,
        page_index: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn map_material_row(row: &Row) -> rusqlite::Result<MaterialRecord> {
    Ok(MaterialRecord {
        id: row.get(0)?,
        bank_page_id: row.get(1)?,
        question_id: row.get(2)?,
        material_type: row.get(3)?,
        value: row.get(4)?,
        description: row.get(5)?,
        metadata: json_from_sql(6, row.get(6)?)?,
        display_order: row.get(7)?,
        created_at: row.get(8)?,
    })
}

fn map_question_row(row: &Row) -> rusqlite::Result<QuestionRecord> {
    Ok(QuestionRecord {
        id: row.get(0)?,
        bank_page_id: row.get(1)?,
        question_type: row.get(2)?,
        question_text: row.get(3)?,
        display_order: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn map_question_option_row(row: &Row) -> rusqlite::Result<QuestionOptionRecord> {
    Ok(QuestionOptionRecord {
        id: row.get(0)?,
        question_id: row.get(1)?,
        option_label: row.get(2)?,
        option_value: row.get(3)?,
        match_target: row.get(4)?,
        metadata: json_from_sql(5, row.get(5)?)?,
    })
}

fn map_answer_row(row: &Row) -> rusqlite::Result<AnswerRecord> {
    Ok(AnswerRecord {
        id: row.get(0)?,
        question_id: row.get(1)?,
        answer_type: row.get(2)?,
        correct_answer: required_json_from_sql(3, row.get(3)?)?,
        created_at: row.get(4)?,
    })
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with the default database location
    pub fn new_default() -> StoreResult<Self> {
        let db = DatabaseConnection::new_default()?;
        Ok(Self::new(db))
    }

    /// Create a repository with the database location named by the config
    pub fn from_config(config: &Config) -> StoreResult<Self> {
        let db = DatabaseConnection::from_config(config)?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> StoreResult<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Access the underlying connection (stats, vacuum)
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    // =========================================================================
    // Exam Operations
    // =========================================================================

    /// Create a new exam
    pub async fn create_exam(&self, exam: &ExamRecord) -> StoreResult<()> {
        let exam = exam.clone();

        self.db
            .execute_async(move |conn| {
                let metadata = json_to_sql(exam.metadata.as_ref())?;
                conn.execute(
                    "INSERT INTO exams (id, name, language, metadata, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![exam.id, exam.name, exam.language, metadata, exam.created_at],
                )?;
                debug!("Created exam {}", exam.id);
                Ok(())
            })
            .await
    }

    /// Get an exam by identifier
    pub async fn get_exam(&self, id: &str) -> StoreResult<ExamRecord> {
        let id = id.to_string();

        self.db
            .execute_async(move |conn| {
                conn.query_row(
                    "SELECT id, name, language, metadata, created_at FROM exams WHERE id = ?1",
                    [&id],
                    map_exam_row,
                )
                .optional()?
                .ok_or_else(|| StoreError::not_found("exam", &id))
            })
            .await
    }

    /// Update an exam's mutable fields (name, language, metadata)
    pub async fn update_exam(&self, exam: &ExamRecord) -> StoreResult<()> {
        let exam = exam.clone();

        self.db
            .execute_async(move |conn| {
                let metadata = json_to_sql(exam.metadata.as_ref())?;
                let affected = conn.execute(
                    "UPDATE exams SET name = ?1, language = ?2, metadata = ?3 WHERE id = ?4",
                    params![exam.name, exam.language, metadata, exam.id],
                )?;
                require_affected(affected, "exam", &exam.id)
            })
            .await
    }

    /// Delete an exam and its whole content subtree
    pub async fn delete_exam(&self, id: &str) -> StoreResult<()> {
        let id = id.to_string();

        self.db
            .execute_async(move |conn| {
                let affected = conn.execute("DELETE FROM exams WHERE id = ?1", [&id])?;
                require_affected(affected, "exam", &id)
            })
            .await
    }

    /// List all exams in insertion order
    pub async fn list_exams(&self) -> StoreResult<Vec<ExamRecord>> {
        self.db
            .execute_async(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, name, language, metadata, created_at FROM exams ORDER BY rowid",
                )?;
                let exams = stmt
                    .query_map([], map_exam_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(exams)
            })
            .await
    }

    // =========================================================================
    // Component Operations
    // =========================================================================

    /// Create a new component under an existing exam
    pub async fn create_component(&self, component: &ComponentRecord) -> StoreResult<()> {
        let component = component.clone();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    "INSERT INTO components (id, exam_id, name, total_questions, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        component.id,
                        component.exam_id,
                        component.name,
                        component.total_questions,
                        component.created_at,
                    ],
                )?;
                Ok(())
            })
            .await
    }

    /// Get a component by identifier
    pub async fn get_component(&self, id: &str) -> StoreResult<ComponentRecord> {
        let id = id.to_string();

        self.db
            .execute_async(move |conn| {
                conn.query_row(
                    "SELECT id, exam_id, name, total_questions, created_at
                     FROM components WHERE id = ?1",
                    [&id],
                    map_component_row,
                )
                .optional()?
                .ok_or_else(|| StoreError::not_found("component", &id))
            })
            .await
    }

    /// Update a component's mutable fields (name, total_questions)
    pub async fn update_component(&self, component: &ComponentRecord) -> StoreResult<()> {
        let component = component.clone();

        self.db
            .execute_async(move |conn| {
                let affected = conn.execute(
                    "UPDATE components SET name = ?1, total_questions = ?2 WHERE id = ?3",
                    params![component.name, component.total_questions, component.id],
                )?;
                require_affected(affected, "component", &component.id)
            })
            .await
    }

    /// Delete a component and its subtree
    pub async fn delete_component(&self, id: &str) -> StoreResult<()> {
        let id = id.to_string();

        self.db
            .execute_async(move |conn| {
                let affected = conn.execute("DELETE FROM components WHERE id = ?1", [&id])?;
                require_affected(affected, "component", &id)
            })
            .await
    }

    /// List all components of an exam in insertion order
    pub async fn list_components(&self, exam_id: &str) -> StoreResult<Vec<ComponentRecord>> {
        let exam_id = exam_id.to_string();

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, exam_id, name, total_questions, created_at
                     FROM components WHERE exam_id = ?1 ORDER BY rowid",
                )?;
                let components = stmt
                    .query_map([&exam_id], map_component_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(components)
            })
            .await
    }

    // =========================================================================
    // Question Bank Operations
    // =========================================================================

    /// Create a new question bank under an existing component
    pub async fn create_question_bank(&self, bank: &QuestionBankRecord) -> StoreResult<()> {
        let bank = bank.clone();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    "INSERT INTO question_banks (id, component_id, code, total_questions)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![bank.id, bank.component_id, bank.code, bank.total_questions],
                )?;
                Ok(())
            })
            .await
    }

    /// Get a question bank by identifier
    pub async fn get_question_bank(&self, id: &str) -> StoreResult<QuestionBankRecord> {
        let id = id.to_string();

        self.db
            .execute_async(move |conn| {
                conn.query_row(
                    "SELECT id, component_id, code, total_questions
                     FROM question_banks WHERE id = ?1",
                    [&id],
                    map_question_bank_row,
                )
                .optional()?
                .ok_or_else(|| StoreError::not_found("question_bank", &id))
            })
            .await
    }

    /// Look up a question bank by its store-wide unique code
    pub async fn find_question_bank_by_code(
        &self,
        code: &str,
    ) -> StoreResult<Option<QuestionBankRecord>> {
        let code = code.to_string();

        self.db
            .execute_async(move |conn| {
                let bank = conn
                    .query_row(
                        "SELECT id, component_id, code, total_questions
                         FROM question_banks WHERE code = ?1",
                        [&code],
                        map_question_bank_row,
                    )
                    .optional()?;
                Ok(bank)
            })
            .await
    }

    /// Update a question bank's mutable fields (code, total_questions)
    pub async fn update_question_bank(&self, bank: &QuestionBankRecord) -> StoreResult<()> {
        let bank = bank.clone();

        self.db
            .execute_async(move |conn| {
                let affected = conn.execute(
                    "UPDATE question_banks SET code = ?1, total_questions = ?2 WHERE id = ?3",
                    params![bank.code, bank.total_questions, bank.id],
                )?;
                require_affected(affected, "question_bank", &bank.id)
            })
            .await
    }

    /// Delete a question bank and its subtree
    pub async fn delete_question_bank(&self, id: &str) -> StoreResult<()> {
        let id = id.to_string();

        self.db
            .execute_async(move |conn| {
                let affected = conn.execute("DELETE FROM question_banks WHERE id = ?1", [&id])?;
                require_affected(affected, "question_bank", &id)
            })
            .await
    }

    /// List all question banks of a component in insertion order
    pub async fn list_question_banks(
        &self,
        component_id: &str,
    ) -> StoreResult<Vec<QuestionBankRecord>> {
        let component_id = component_id.to_string();

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, component_id, code, total_questions
                     FROM question_banks WHERE component_id = ?1 ORDER BY rowid",
                )?;
                let banks = stmt
                    .query_map([&component_id], map_question_bank_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(banks)
            })
            .await
    }

    // =========================================================================
    // Bank Page Operations
    // =========================================================================

    /// Create a new page under an existing question bank
    pub async fn create_bank_page(&self, page: &BankPageRecord) -> StoreResult<()> {
        let page = page.clone();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    "INSERT INTO bank_pages (id, question_bank_id, page_index, created_at)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![page.id, page.question_bank_id, page.page_index, page.created_at],
                )?;
                Ok(())
            })
            .await
    }

    /// Get a bank page by identifier
    pub async fn get_bank_page(&self, id: &str) -> StoreResult<BankPageRecord> {
        let id = id.to_string();

        self.db
            .execute_async(move |conn| {
                conn.query_row(
                    "SELECT id, question_bank_id, page_index, created_at
                     FROM bank_pages WHERE id = ?1",
                    [&id],
                    map_bank_page_row,
                )
                .optional()?
                .ok_or_else(|| StoreError::not_found("bank_page", &id))
            })
            .await
    }

    /// Update a bank page's mutable fields (page_index)
    pub async fn update_bank_page(&self, page: &BankPageRecord) -> StoreResult<()> {
        let page = page.clone();

        self.db
            .execute_async(move |conn| {
                let affected = conn.execute(
                    "UPDATE bank_pages SET page_index = ?1 WHERE id = ?2",
                    params![page.page_index, page.id],
                )?;
                require_affected(affected, "bank_page", &page.id)
            })
            .await
    }

    /// Delete a bank page and its subtree
    pub async fn delete_bank_page(&self, id: &str) -> StoreResult<()> {
        let id = id.to_string();

        self.db
            .execute_async(move |conn| {
                let affected = conn.execute("DELETE FROM bank_pages WHERE id = ?1", [&id])?;
                require_affected(affected, "bank_page", &id)
            })
            .await
    }

    /// List all pages of a question bank in insertion order
    pub async fn list_bank_pages(
        &self,
        question_bank_id: &str,
    ) -> StoreResult<Vec<BankPageRecord>> {
        let question_bank_id = question_bank_id.to_string();

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, question_bank_id, page_index, created_at
                     FROM bank_pages WHERE question_bank_id = ?1 ORDER BY rowid",
                )?;
                let pages = stmt
                    .query_map([&question_bank_id], map_bank_page_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(pages)
            })
            .await
    }

    // =========================================================================
    // Question Operations
    // =========================================================================

    /// Create a new question under an existing bank page
    pub async fn create_question(&self, question: &QuestionRecord) -> StoreResult<()> {
        let question = question.clone();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    "INSERT INTO questions (id, bank_page_id, question_type, question_text, display_order, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        question.id,
                        question.bank_page_id,
                        question.question_type,
                        question.question_text,
                        question.display_order,
                        question.created_at,
                    ],
                )?;
                Ok(())
            })
            .await
    }

    /// Get a question by identifier
    pub async fn get_question(&self, id: &str) -> StoreResult<QuestionRecord> {
        let id = id.to_string();

        self.db
            .execute_async(move |conn| {
                conn.query_row(
                    "SELECT id, bank_page_id, question_type, question_text, display_order, created_at
                     FROM questions WHERE id = ?1",
                    [&id],
                    map_question_row,
                )
                .optional()?
                .ok_or_else(|| StoreError::not_found("question", &id))
            })
            .await
    }

    /// Update a question's mutable fields (type, text, display_order)
    pub async fn update_question(&self, question: &QuestionRecord) -> StoreResult<()> {
        let question = question.clone();

        self.db
            .execute_async(move |conn| {
                let affected = conn.execute(
                    "UPDATE questions SET question_type = ?1, question_text = ?2, display_order = ?3
                     WHERE id = ?4",
                    params![
                        question.question_type,
                        question.question_text,
                        question.display_order,
                        question.id,
                    ],
                )?;
                require_affected(affected, "question", &question.id)
            })
            .await
    }

    /// Delete a question and its options, answers and materials
    pub async fn delete_question(&self, id: &str) -> StoreResult<()> {
        let id = id.to_string();

        self.db
            .execute_async(move |conn| {
                let affected = conn.execute("DELETE FROM questions WHERE id = ?1", [&id])?;
                require_affected(affected, "question", &id)
            })
            .await
    }

    /// List all questions of a bank page in insertion order
    pub async fn list_questions(&self, bank_page_id: &str) -> StoreResult<Vec<QuestionRecord>> {
        let bank_page_id = bank_page_id.to_string();

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, bank_page_id, question_type, question_text, display_order, created_at
                     FROM questions WHERE bank_page_id = ?1 ORDER BY rowid",
                )?;
                let questions = stmt
                    .query_map([&bank_page_id], map_question_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(questions)
            })
            .await
    }

    // =========================================================================
    // Material Operations
    // =========================================================================

    /// Create a new material record
    pub async fn create_material(&self, material: &MaterialRecord) -> StoreResult<()> {
        let material = material.clone();

        self.db
            .execute_async(move |conn| {
                let metadata = json_to_sql(material.metadata.as_ref())?;
                conn.execute(
                    "INSERT INTO materials (id, bank_page_id, question_id, material_type, value,
                                            description, metadata, display_order, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                    params![
                        material.id,
                        material.bank_page_id,
                        material.question_id,
                        material.material_type,
                        material.value,
                        material.description,
                        metadata,
                        material.display_order,
                        material.created_at,
                    ],
                )?;
                Ok(())
            })
            .await
    }

    /// Get a material by identifier
    pub async fn get_material(&self, id: &str) -> StoreResult<MaterialRecord> {
        let id = id.to_string();

        self.db
            .execute_async(move |conn| {
                conn.query_row(
                    "SELECT id, bank_page_id, question_id, material_type, value,
                            description, metadata, display_order, created_at
                     FROM materials WHERE id = ?1",
                    [&id],
                    map_material_row,
                )
                .optional()?
                .ok_or_else(|| StoreError::not_found("material", &id))
            })
            .await
    }

    /// Update a material's mutable fields (type, value, description, metadata, display_order)
    pub async fn update_material(&self, material: &MaterialRecord) -> StoreResult<()> {
        let material = material.clone();

        self.db
            .execute_async(move |conn| {
                let metadata = json_to_sql(material.metadata.as_ref())?;
                let affected = conn.execute(
                    "UPDATE materials SET material_type = ?1, value = ?2, description = ?3,
                                          metadata = ?4, display_order = ?5
                     WHERE id = ?6",
                    params![
                        material.material_type,
                        material.value,
                        material.description,
                        metadata,
                        material.display_order,
                        material.id,
                    ],
                )?;
                require_affected(affected, "material", &material.id)
            })
            .await
    }

    /// Delete a material
    pub async fn delete_material(&self, id: &str) -> StoreResult<()> {
        let id = id.to_string();

        self.db
            .execute_async(move |conn| {
                let affected = conn.execute("DELETE FROM materials WHERE id = ?1", [&id])?;
                require_affected(affected, "material", &id)
            })
            .await
    }

    /// List all materials of a bank page in insertion order
    pub async fn list_page_materials(
        &self,
        bank_page_id: &str,
    ) -> StoreResult<Vec<MaterialRecord>> {
        let bank_page_id = bank_page_id.to_string();

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, bank_page_id, question_id, material_type, value,
                            description, metadata, display_order, created_at
                     FROM materials WHERE bank_page_id = ?1 ORDER BY rowid",
                )?;
                let materials = stmt
                    .query_map([&bank_page_id], map_material_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(materials)
            })
            .await
    }

    /// List all materials of a question in insertion order
    pub async fn list_question_materials(
        &self,
        question_id: &str,
    ) -> StoreResult<Vec<MaterialRecord>> {
        let question_id = question_id.to_string();

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, bank_page_id, question_id, material_type, value,
                            description, metadata, display_order, created_at
                     FROM materials WHERE question_id = ?1 ORDER BY rowid",
                )?;
                let materials = stmt
                    .query_map([&question_id], map_material_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(materials)
            })
            .await
    }

    // =========================================================================
    // Question Option Operations
    // =========================================================================

    /// Create a new option under an existing question
    pub async fn create_question_option(
        &self,
        option: &QuestionOptionRecord,
    ) -> StoreResult<()> {
        let option = option.clone();

        self.db
            .execute_async(move |conn| {
                let metadata = json_to_sql(option.metadata.as_ref())?;
                conn.execute(
                    "INSERT INTO question_options (id, question_id, option_label, option_value,
                                                   match_target, metadata)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        option.id,
                        option.question_id,
                        option.option_label,
                        option.option_value,
                        option.match_target,
                        metadata,
                    ],
                )?;
                Ok(())
            })
            .await
    }

    /// Get an option by identifier
    pub async fn get_question_option(&self, id: &str) -> StoreResult<QuestionOptionRecord> {
        let id = id.to_string();

        self.db
            .execute_async(move |conn| {
                conn.query_row(
                    "SELECT id, question_id, option_label, option_value, match_target, metadata
                     FROM question_options WHERE id = ?1",
                    [&id],
                    map_question_option_row,
                )
                .optional()?
                .ok_or_else(|| StoreError::not_found("question_option", &id))
            })
            .await
    }

    /// Update an option's mutable fields (label, value, match_target, metadata)
    pub async fn update_question_option(
        &self,
        option: &QuestionOptionRecord,
    ) -> StoreResult<()> {
        let option = option.clone();

        self.db
            .execute_async(move |conn| {
                let metadata = json_to_sql(option.metadata.as_ref())?;
                let affected = conn.execute(
                    "UPDATE question_options SET option_label = ?1, option_value = ?2,
                                                 match_target = ?3, metadata = ?4
                     WHERE id = ?5",
                    params![
                        option.option_label,
                        option.option_value,
                        option.match_target,
                        metadata,
                        option.id,
                    ],
                )?;
                require_affected(affected, "question_option", &option.id)
            })
            .await
    }

    /// Delete an option
    pub async fn delete_question_option(&self, id: &str) -> StoreResult<()> {
        let id = id.to_string();

        self.db
            .execute_async(move |conn| {
                let affected =
                    conn.execute("DELETE FROM question_options WHERE id = ?1", [&id])?;
                require_affected(affected, "question_option", &id)
            })
            .await
    }

    /// List all options of a question in insertion order
    pub async fn list_options(&self, question_id: &str) -> StoreResult<Vec<QuestionOptionRecord>> {
        let question_id = question_id.to_string();

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, question_id, option_label, option_value, match_target, metadata
                     FROM question_options WHERE question_id = ?1 ORDER BY rowid",
                )?;
                let options = stmt
                    .query_map([&question_id], map_question_option_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(options)
            })
            .await
    }

    // =========================================================================
    // Answer Operations
    // =========================================================================

    /// Create a new answer under an existing question
    pub async fn create_answer(&self, answer: &AnswerRecord) -> StoreResult<()> {
        let answer = answer.clone();

        self.db
            .execute_async(move |conn| {
                let correct_answer = required_json_to_sql(&answer.correct_answer)?;
                conn.execute(
                    "INSERT INTO answers (id, question_id, answer_type, correct_answer, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        answer.id,
                        answer.question_id,
                        answer.answer_type,
                        correct_answer,
                        answer.created_at,
                    ],
                )?;
                Ok(())
            })
            .await
    }

    /// Get an answer by identifier
    pub async fn get_answer(&self, id: &str) -> StoreResult<AnswerRecord> {
        let id = id.to_string();

        self.db
            .execute_async(move |conn| {
                conn.query_row(
                    "SELECT id, question_id, answer_type, correct_answer, created_at
                     FROM answers WHERE id = ?1",
                    [&id],
                    map_answer_row,
                )
                .optional()?
                .ok_or_else(|| StoreError::not_found("answer", &id))
            })
            .await
    }

    /// Update an answer's mutable fields (type, correct_answer)
    pub async fn update_answer(&self, answer: &AnswerRecord) -> StoreResult<()> {
        let answer = answer.clone();

        self.db
            .execute_async(move |conn| {
                let correct_answer = required_json_to_sql(&answer.correct_answer)?;
                let affected = conn.execute(
                    "UPDATE answers SET answer_type = ?1, correct_answer = ?2 WHERE id = ?3",
                    params![answer.answer_type, correct_answer, answer.id],
                )?;
                require_affected(affected, "answer", &answer.id)
            })
            .await
    }

    /// Delete an answer
    pub async fn delete_answer(&self, id: &str) -> StoreResult<()> {
        let id = id.to_string();

        self.db
            .execute_async(move |conn| {
                let affected = conn.execute("DELETE FROM answers WHERE id = ?1", [&id])?;
                require_affected(affected, "answer", &id)
            })
            .await
    }

    /// List all answers of a question in insertion order
    pub async fn list_answers(&self, question_id: &str) -> StoreResult<Vec<AnswerRecord>> {
        let question_id = question_id.to_string();

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, question_id, answer_type, correct_answer, created_at
                     FROM answers WHERE question_id = ?1 ORDER BY rowid",
                )?;
                let answers = stmt
                    .query_map([&question_id], map_answer_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(answers)
            })
            .await
    }
}
