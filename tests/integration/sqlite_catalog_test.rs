//! Catalog queries against the seeded SQLite fixture.

use super::common::{expected_rows, seeded_sqlite, sorted_rows};
use fitclub_report::catalog::{
    Operation, INSTRUCTORS_EXIST, INSTRUCTORS_MISSING, VISITORS_EXIST, VISITORS_MISSING,
};
use fitclub_report::report::ReportEntry;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_instructors_exist_follows_table_contents() {
    let (pool, runner) = seeded_sqlite().await;

    assert_eq!(runner.check_instructors_exist().await.unwrap(), INSTRUCTORS_EXIST);

    sqlx::query("DELETE FROM instructors")
        .execute(&pool)
        .await
        .unwrap();
    assert_eq!(runner.check_instructors_exist().await.unwrap(), INSTRUCTORS_MISSING);

    sqlx::query("INSERT INTO instructors (id, first_name, last_name, section_id) VALUES (9, 'Олег', 'Орлов', NULL)")
        .execute(&pool)
        .await
        .unwrap();
    assert_eq!(runner.check_instructors_exist().await.unwrap(), INSTRUCTORS_EXIST);
}

#[tokio::test]
async fn test_visitors_in_section_uses_bound_parameter() {
    let (pool, runner) = seeded_sqlite().await;

    assert_eq!(runner.check_visitors_in_section(1).await.unwrap(), VISITORS_EXIST);
    assert_eq!(runner.check_visitors_in_section(5).await.unwrap(), VISITORS_MISSING);
    assert_eq!(runner.check_visitors_in_section(404).await.unwrap(), VISITORS_MISSING);

    sqlx::query("INSERT INTO visits (id, visitor_id, section_id) VALUES (9, 3, 5)")
        .execute(&pool)
        .await
        .unwrap();
    assert_eq!(runner.check_visitors_in_section(5).await.unwrap(), VISITORS_EXIST);
}

#[tokio::test]
async fn test_visitors_attended_earlier_than_afternoon_sessions() {
    let (_pool, runner) = seeded_sqlite().await;

    let result = runner
        .visitors_attended_earlier_than_afternoon_sessions()
        .await
        .unwrap();

    assert_eq!(result.columns[0].name, "first_name");
    assert_eq!(result.columns[1].name, "last_name");
    assert_eq!(
        sorted_rows(&result),
        expected_rows(&[
            &["Анна", "Петрова"],
            &["Иван", "Сидоров"],
            &["Мария", "Иванова"],
        ])
    );
}

#[tokio::test]
async fn test_no_afternoon_sessions_means_no_earlier_visits() {
    let (pool, runner) = seeded_sqlite().await;

    sqlx::raw_sql(
        "UPDATE instructors SET section_id = NULL WHERE section_id IN (3, 4);
         DELETE FROM visits WHERE section_id IN (3, 4, 5);
         DELETE FROM sections WHERE start_time >= '12:00:00';",
    )
    .execute(&pool)
    .await
    .unwrap();

    let result = runner
        .visitors_attended_earlier_than_afternoon_sessions()
        .await
        .unwrap();
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_instructors_with_sessions_at_3pm() {
    let (_pool, runner) = seeded_sqlite().await;

    // The subquery projects each instructor's own section, so any 15:00
    // section admits every instructor that has a section.
    let result = runner.instructors_with_sessions_at_3pm().await.unwrap();
    assert_eq!(
        sorted_rows(&result),
        expected_rows(&[
            &["Анна", "Петрова"],
            &["Елена", "Волкова"],
            &["Сергей", "Кузнецов"],
        ])
    );
}

#[tokio::test]
async fn test_instructors_at_3pm_skips_instructor_without_section() {
    let (pool, runner) = seeded_sqlite().await;

    sqlx::query("UPDATE instructors SET section_id = NULL WHERE id = 1")
        .execute(&pool)
        .await
        .unwrap();

    let result = runner.instructors_with_sessions_at_3pm().await.unwrap();
    assert_eq!(
        sorted_rows(&result),
        expected_rows(&[&["Елена", "Волкова"], &["Сергей", "Кузнецов"]])
    );
}

#[tokio::test]
async fn test_instructors_at_3pm_empty_without_3pm_section() {
    let (pool, runner) = seeded_sqlite().await;

    sqlx::query("UPDATE sections SET start_time = '16:00:00' WHERE id = 3")
        .execute(&pool)
        .await
        .unwrap();

    let result = runner.instructors_with_sessions_at_3pm().await.unwrap();
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_visitors_attended_all_morning_sessions() {
    let (_pool, runner) = seeded_sqlite().await;

    let result = runner.visitors_attended_all_morning_sessions().await.unwrap();
    assert_eq!(
        sorted_rows(&result),
        expected_rows(&[&["Анна", "Петрова"], &["Мария", "Иванова"]])
    );
}

#[tokio::test]
async fn test_no_morning_sessions_means_every_visitor_qualifies() {
    let (pool, runner) = seeded_sqlite().await;

    sqlx::raw_sql(
        "UPDATE instructors SET section_id = NULL WHERE section_id IN (1, 2);
         DELETE FROM visits WHERE section_id IN (1, 2);
         DELETE FROM sections WHERE start_time < '12:00:00';",
    )
    .execute(&pool)
    .await
    .unwrap();

    let result = runner.visitors_attended_all_morning_sessions().await.unwrap();
    assert_eq!(result.row_count(), 4);
}

#[tokio::test]
async fn test_all_mornings_and_any_evening_admits_every_assigned_instructor() {
    let (pool, runner) = seeded_sqlite().await;

    sqlx::query("INSERT INTO instructors (id, first_name, last_name, section_id) VALUES (4, 'Олег', 'Орлов', NULL)")
        .execute(&pool)
        .await
        .unwrap();

    let result = runner
        .instructors_with_all_morning_and_any_evening()
        .await
        .unwrap();
    assert_eq!(
        sorted_rows(&result),
        expected_rows(&[
            &["Анна", "Петрова"],
            &["Елена", "Волкова"],
            &["Сергей", "Кузнецов"],
        ])
    );
}

#[tokio::test]
async fn test_all_mornings_and_any_evening_empty_without_evening_sections() {
    let (pool, runner) = seeded_sqlite().await;

    sqlx::raw_sql(
        "UPDATE instructors SET section_id = NULL WHERE section_id IN (4, 5);
         DELETE FROM visits WHERE section_id IN (4, 5);
         DELETE FROM sections WHERE start_time >= '17:00:00';",
    )
    .execute(&pool)
    .await
    .unwrap();

    let result = runner
        .instructors_with_all_morning_and_any_evening()
        .await
        .unwrap();
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_all_mornings_and_any_evening_without_morning_sections() {
    let (pool, runner) = seeded_sqlite().await;

    sqlx::raw_sql(
        "UPDATE instructors SET section_id = NULL WHERE section_id IN (1, 2);
         DELETE FROM visits WHERE section_id IN (1, 2);
         DELETE FROM sections WHERE start_time < '12:00:00';",
    )
    .execute(&pool)
    .await
    .unwrap();

    let result = runner
        .instructors_with_all_morning_and_any_evening()
        .await
        .unwrap();
    assert_eq!(
        sorted_rows(&result),
        expected_rows(&[&["Елена", "Волкова"], &["Сергей", "Кузнецов"]])
    );
}

#[tokio::test]
async fn test_union_removes_duplicates_and_union_all_keeps_them() {
    let (_pool, runner) = seeded_sqlite().await;

    let unique = runner.unique_names_instructors_visitors().await.unwrap();
    let all = runner.all_names_instructors_visitors().await.unwrap();

    assert_eq!(unique.row_count(), 6);
    assert_eq!(all.row_count(), 7);

    let duplicates = sorted_rows(&all)
        .into_iter()
        .filter(|r| r[0] == "Анна" && r[1] == "Петрова")
        .count();
    assert_eq!(duplicates, 2);

    let mut deduplicated = sorted_rows(&all);
    deduplicated.dedup();
    assert_eq!(sorted_rows(&unique), deduplicated);
}

#[tokio::test]
async fn test_inner_join_lists_every_visit() {
    let (_pool, runner) = seeded_sqlite().await;

    let result = runner.inner_join_visits_sections().await.unwrap();

    let names: Vec<&str> = result.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["first_name", "last_name", "section_name"]);
    assert_eq!(result.row_count(), 8);
    assert!(result.rows.iter().flatten().all(|v| !v.is_null()));
}

#[tokio::test]
async fn test_left_join_keeps_visitor_without_visits() {
    let (_pool, runner) = seeded_sqlite().await;

    let result = runner.left_join_visitors_sections().await.unwrap();
    assert_eq!(result.row_count(), 9);

    let rows = sorted_rows(&result);
    assert!(rows.contains(&vec![
        "Ольга".to_string(),
        "Смирнова".to_string(),
        "NULL".to_string()
    ]));
}

#[tokio::test]
async fn test_right_join_keeps_section_without_visits() {
    let (_pool, runner) = seeded_sqlite().await;

    let result = runner.right_join_visitors_sections().await.unwrap();
    assert_eq!(result.row_count(), 9);

    let rows = sorted_rows(&result);
    assert!(rows.contains(&vec![
        "NULL".to_string(),
        "NULL".to_string(),
        "Растяжка".to_string()
    ]));
    assert!(!rows.iter().any(|r| r[0] == "Ольга"));
}

#[tokio::test]
async fn test_full_join_keeps_both_unmatched_sides() {
    let (_pool, runner) = seeded_sqlite().await;

    let result = runner.full_join_visitors_sections().await.unwrap();
    assert_eq!(result.row_count(), 10);

    let rows = sorted_rows(&result);
    assert!(rows.iter().any(|r| r[0] == "Ольга" && r[2] == "NULL"));
    assert!(rows.iter().any(|r| r[0] == "NULL" && r[2] == "Растяжка"));
}

#[tokio::test]
async fn test_run_all_builds_complete_report() {
    let (_pool, runner) = seeded_sqlite().await;

    let report = runner.run_all(1).await.unwrap();

    let keys: Vec<&str> = report.keys().collect();
    let expected: Vec<&str> = Operation::ALL.iter().map(Operation::key).collect();
    assert_eq!(keys, expected);

    assert_eq!(
        report.get("exists_instructors"),
        Some(&ReportEntry::Status(INSTRUCTORS_EXIST.to_string()))
    );
    assert_eq!(
        report.get("exists_visitors"),
        Some(&ReportEntry::Status(VISITORS_EXIST.to_string()))
    );

    let json = report.to_json();
    assert_eq!(json["some_query"].as_array().unwrap().len(), 3);
    assert_eq!(json["any_all_combination"].as_array().unwrap().len(), 3);
    assert_eq!(json["union_all_query"].as_array().unwrap().len(), 7);

    runner.close().await.unwrap();
}

#[tokio::test]
async fn test_missing_table_fails_with_operation_key() {
    let (pool, runner) = seeded_sqlite().await;

    sqlx::query("DROP TABLE visits").execute(&pool).await.unwrap();

    let err = runner.run_all(1).await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("exists_visitors"), "{message}");
    assert!(message.contains("visits"), "{message}");
}
