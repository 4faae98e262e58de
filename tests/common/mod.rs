/*!
 * Common test utilities for the examstore test suite
 */

use examstore::{
    AnswerRecord, BankPageRecord, ComponentRecord, ExamRecord, MaterialRecord,
    QuestionBankRecord, QuestionOptionRecord, QuestionRecord, Repository, StoreResult,
};
use serde_json::json;

/// Initialize logging for tests; safe to call repeatedly
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Generate a fresh caller-supplied identifier
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Identifiers of a fully populated content tree
pub struct SeededTree {
    pub exam_id: String,
    pub component_id: String,
    pub bank_id: String,
    pub bank_code: String,
    pub page_id: String,
    pub question_id: String,
    pub option_id: String,
    pub answer_id: String,
    pub material_id: String,
}

/// Seed one record at every level of the hierarchy
pub async fn seed_tree(repo: &Repository) -> StoreResult<SeededTree> {
    let tree = SeededTree {
        exam_id: new_id(),
        component_id: new_id(),
        bank_id: new_id(),
        bank_code: format!("RB-{}", new_id()),
        page_id: new_id(),
        question_id: new_id(),
        option_id: new_id(),
        answer_id: new_id(),
        material_id: new_id(),
    };

    repo.create_exam(
        &ExamRecord::new(tree.exam_id.clone(), "Sample".to_string(), "en".to_string())
            .with_metadata(json!({})),
    )
    .await?;
    repo.create_component(&ComponentRecord::new(
        tree.component_id.clone(),
        tree.exam_id.clone(),
        "Reading".to_string(),
        10,
    ))
    .await?;
    repo.create_question_bank(&QuestionBankRecord::new(
        tree.bank_id.clone(),
        tree.component_id.clone(),
        tree.bank_code.clone(),
        10,
    ))
    .await?;
    repo.create_bank_page(&BankPageRecord::new(
        tree.page_id.clone(),
        tree.bank_id.clone(),
        1,
    ))
    .await?;
    repo.create_question(&QuestionRecord::new(
        tree.question_id.clone(),
        tree.page_id.clone(),
        "mcq".to_string(),
        "2+2=?".to_string(),
        1,
    ))
    .await?;
    repo.create_question_option(&QuestionOptionRecord::new(
        tree.option_id.clone(),
        tree.question_id.clone(),
        "4".to_string(),
    ))
    .await?;
    repo.create_answer(&AnswerRecord::new(
        tree.answer_id.clone(),
        tree.question_id.clone(),
        "mcq".to_string(),
        json!({"value": "4"}),
    ))
    .await?;
    repo.create_material(&MaterialRecord::for_page(
        tree.material_id.clone(),
        tree.page_id.clone(),
        "text".to_string(),
        "Read the passage below".to_string(),
        1,
    ))
    .await?;

    Ok(tree)
}
