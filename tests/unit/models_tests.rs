/*!
 * Tests for entity record construction and serialization
 */

use examstore::{
    AnswerRecord, BankPageRecord, ComponentRecord, ExamRecord, MaterialRecord,
    QuestionBankRecord, QuestionOptionRecord, QuestionRecord,
};
use serde_json::json;

use crate::common::new_id;

#[test]
fn test_examRecord_new_shouldStampRfc3339CreationTime() {
    let exam = ExamRecord::new(new_id(), "Sample".to_string(), "en".to_string());

    // RFC 3339 timestamps parse back with chrono
    assert!(chrono::DateTime::parse_from_rfc3339(&exam.created_at).is_ok());
}

#[test]
fn test_questionBankRecord_shouldCarryNoCreationTime() {
    let bank = QuestionBankRecord::new(new_id(), new_id(), "RB-001".to_string(), 25);
    let encoded = serde_json::to_value(&bank).unwrap();

    assert_eq!(encoded["code"], "RB-001");
    assert!(encoded.get("created_at").is_none());
}

#[test]
fn test_materialRecord_forQuestion_shouldLeavePageUnset() {
    let question_id = new_id();
    let material = MaterialRecord::for_question(
        new_id(),
        question_id.clone(),
        "image".to_string(),
        "figure-1.png".to_string(),
        3,
    );

    assert_eq!(material.question_id, Some(question_id));
    assert!(material.bank_page_id.is_none());
    assert!(material.description.is_none());
}

#[test]
fn test_records_serde_shouldRoundTripThroughJson() {
    let question = QuestionRecord::new(
        new_id(),
        new_id(),
        "matching".to_string(),
        "Match each term".to_string(),
        2,
    );
    let option = QuestionOptionRecord::new(new_id(), question.id.clone(), "ion".to_string())
        .with_match_target("charged atom".to_string());
    let answer = AnswerRecord::new(
        new_id(),
        question.id.clone(),
        "matching".to_string(),
        json!({"pairs": [["ion", "charged atom"]]}),
    );
    let page = BankPageRecord::new(new_id(), new_id(), 7);
    let component = ComponentRecord::new(new_id(), new_id(), "Listening".to_string(), 40);

    let decoded: QuestionRecord =
        serde_json::from_str(&serde_json::to_string(&question).unwrap()).unwrap();
    assert_eq!(decoded.question_text, "Match each term");

    let decoded: QuestionOptionRecord =
        serde_json::from_str(&serde_json::to_string(&option).unwrap()).unwrap();
    assert_eq!(decoded.match_target.as_deref(), Some("charged atom"));

    let decoded: AnswerRecord =
        serde_json::from_str(&serde_json::to_string(&answer).unwrap()).unwrap();
    assert_eq!(decoded.correct_answer["pairs"][0][0], "ion");

    let decoded: BankPageRecord =
        serde_json::from_str(&serde_json::to_string(&page).unwrap()).unwrap();
    assert_eq!(decoded.page_index, 7);

    let decoded: ComponentRecord =
        serde_json::from_str(&serde_json::to_string(&component).unwrap()).unwrap();
    assert_eq!(decoded.total_questions, 40);
}
