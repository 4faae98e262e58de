/*!
 * End-to-end lifecycle tests for the exam content store.
 *
 * These exercise the full contract against a real database: building a
 * complete content tree, reading it back, and verifying that deleting
 * the root removes every reachable descendant.
 */

use examstore::{ComponentRecord, ExamRecord, QuestionBankRecord, Repository};
use serde_json::json;

use crate::common::{init_test_logging, new_id, seed_tree};

#[tokio::test]
async fn test_fullTree_createReadDelete_shouldCascadeFromRoot() {
    init_test_logging();
    let repo = Repository::new_in_memory().expect("Failed to create repository");
    let tree = seed_tree(&repo).await.expect("Failed to seed tree");

    // Every level reads back with the supplied identifiers
    assert_eq!(repo.get_exam(&tree.exam_id).await.unwrap().name, "Sample");
    assert_eq!(
        repo.get_component(&tree.component_id).await.unwrap().exam_id,
        tree.exam_id
    );
    assert_eq!(
        repo.get_question_bank(&tree.bank_id).await.unwrap().code,
        tree.bank_code
    );
    assert_eq!(repo.get_bank_page(&tree.page_id).await.unwrap().page_index, 1);
    assert_eq!(
        repo.get_question(&tree.question_id).await.unwrap().question_text,
        "2+2=?"
    );
    assert_eq!(
        repo.get_question_option(&tree.option_id).await.unwrap().option_value,
        "4"
    );
    assert_eq!(
        repo.get_answer(&tree.answer_id).await.unwrap().correct_answer,
        json!({"value": "4"})
    );
    assert_eq!(
        repo.get_material(&tree.material_id)
            .await
            .unwrap()
            .bank_page_id
            .as_deref(),
        Some(tree.page_id.as_str())
    );

    // Deleting the exam removes the entire subtree
    repo.delete_exam(&tree.exam_id).await.expect("Failed to delete exam");

    assert!(repo.get_exam(&tree.exam_id).await.unwrap_err().is_not_found());
    assert!(repo.get_component(&tree.component_id).await.unwrap_err().is_not_found());
    assert!(repo.get_question_bank(&tree.bank_id).await.unwrap_err().is_not_found());
    assert!(repo.get_bank_page(&tree.page_id).await.unwrap_err().is_not_found());
    assert!(repo.get_question(&tree.question_id).await.unwrap_err().is_not_found());
    assert!(repo.get_question_option(&tree.option_id).await.unwrap_err().is_not_found());
    assert!(repo.get_answer(&tree.answer_id).await.unwrap_err().is_not_found());
    assert!(repo.get_material(&tree.material_id).await.unwrap_err().is_not_found());

    // A second delete of the same identifier is a NotFound, not a no-op
    assert!(repo.delete_exam(&tree.exam_id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_bankCodes_acrossExams_shouldStayUniqueStoreWide() {
    let repo = Repository::new_in_memory().expect("Failed to create repository");

    let first = seed_tree(&repo).await.expect("Failed to seed first tree");
    let second = seed_tree(&repo).await.expect("Failed to seed second tree");

    // Reusing the first tree's code anywhere in the store is rejected
    let clashing = QuestionBankRecord::new(
        new_id(),
        second.component_id.clone(),
        first.bank_code.clone(),
        5,
    );
    let err = repo.create_question_bank(&clashing).await.unwrap_err();
    assert!(err.is_constraint_violation());

    // The code lookup resolves to the original bank
    let found = repo
        .find_question_bank_by_code(&first.bank_code)
        .await
        .unwrap()
        .expect("Code should resolve");
    assert_eq!(found.id, first.bank_id);
}

#[tokio::test]
async fn test_fileBackedStore_shouldSurviveReopen() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("lifecycle.db");
    let exam_id = new_id();

    {
        let repo = Repository::new(
            examstore::DatabaseConnection::new(&db_path).expect("Failed to open store"),
        );
        repo.create_exam(&ExamRecord::new(
            exam_id.clone(),
            "Persistent".to_string(),
            "en".to_string(),
        ))
        .await
        .expect("Failed to create exam");
    }

    let repo = Repository::new(
        examstore::DatabaseConnection::new(&db_path).expect("Failed to reopen store"),
    );
    let exam = repo.get_exam(&exam_id).await.expect("Exam should persist");
    assert_eq!(exam.name, "Persistent");

    // Cascade deletes still work on the reopened connection
    let component_id = new_id();
    repo.create_component(&ComponentRecord::new(
        component_id.clone(),
        exam_id.clone(),
        "Writing".to_string(),
        5,
    ))
    .await
    .unwrap();
    repo.delete_exam(&exam_id).await.unwrap();
    assert!(repo.get_component(&component_id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_storeStats_shouldCountSeededEntities() {
    let repo = Repository::new_in_memory().expect("Failed to create repository");
    seed_tree(&repo).await.expect("Failed to seed tree");

    let stats = repo.connection().stats().expect("Failed to get stats");
    assert_eq!(stats.exam_count, 1);
    assert_eq!(stats.question_bank_count, 1);
    assert_eq!(stats.question_count, 1);
    assert_eq!(stats.material_count, 1);
}
