use boulder_board::db::Storage;
use boulder_board::report::{self, ReportValue, RoundCounter, build_report};
use boulder_board::types::records::{
    NewBoulderProblem, NewCategory, NewCompetition, NewRound, NewScore,
};
use boulder_board::{BoardError, ReportError, RoundCountError};
use chrono::{TimeZone, Utc};

async fn store() -> Storage {
    Storage::in_memory().await.expect("failed to open in-memory store")
}

async fn competition(storage: &Storage, name: &str) -> i64 {
    storage
        .insert_competition(&NewCompetition {
            name: name.to_string(),
        })
        .await
        .expect("insert competition")
        .id
}

async fn category(storage: &Storage, name: &str) -> i64 {
    storage
        .insert_category(&NewCategory {
            name: name.to_string(),
        })
        .await
        .expect("insert category")
        .id
}

async fn round(storage: &Storage, competition_id: i64, number: i64) -> Result<i64, BoardError> {
    let round = storage
        .insert_round(&NewRound {
            number,
            start_date: Utc.with_ymd_and_hms(2024, 7, number as u32, 10, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 7, number as u32, 19, 0, 0).unwrap(),
            competition_id,
        })
        .await?;
    Ok(round.id)
}

async fn problem(storage: &Storage, round_id: i64, number: i64) -> i64 {
    storage
        .insert_boulder_problem(&NewBoulderProblem { number, round_id })
        .await
        .expect("insert boulder problem")
        .id
}

async fn competitor(storage: &Storage, name: &str, category_id: i64) -> i64 {
    storage
        .insert_competitor(
            name,
            &format!("{}@example.com", name.to_lowercase()),
            "$argon2i$placeholder",
            category_id,
        )
        .await
        .expect("insert competitor")
        .id
}

async fn score(storage: &Storage, competitor_id: i64, problem_id: i64, points: i64) {
    storage
        .insert_score(&NewScore {
            attempts: 1,
            points,
            competitor_id,
            problem_id,
        })
        .await
        .expect("insert score");
}

/// "Boulder Open": two rounds; Alice (Open) scores 10 in round 1 over two
/// problems and 5 in round 2; Bob (Open) has no scores.
async fn boulder_open(storage: &Storage) -> (i64, i64) {
    let comp = competition(storage, "Boulder Open").await;
    let open = category(storage, "Open").await;
    let r1 = round(storage, comp, 1).await.expect("round 1");
    let r2 = round(storage, comp, 2).await.expect("round 2");
    let p1 = problem(storage, r1, 1).await;
    let p2 = problem(storage, r1, 2).await;
    let p3 = problem(storage, r2, 1).await;

    let alice = competitor(storage, "Alice", open).await;
    let bob = competitor(storage, "Bob", open).await;
    score(storage, alice, p1, 6).await;
    score(storage, alice, p2, 4).await;
    score(storage, alice, p3, 5).await;
    (alice, bob)
}

#[tokio::test]
async fn boulder_open_leaderboard_round_trip() {
    let storage = store().await;
    boulder_open(&storage).await;

    let rows = report::leaderboard(&storage, "Open", "Boulder Open")
        .await
        .expect("report");

    let json = serde_json::to_string(&rows).expect("serialize report");
    assert_eq!(
        json,
        r#"[{"competitor_name":"Alice","total":15,"round_1":10,"round_2":5},{"competitor_name":"Bob","total":0,"round_1":0,"round_2":0}]"#
    );
}

#[tokio::test]
async fn competitor_without_scores_reports_zero_not_null() {
    let storage = store().await;
    boulder_open(&storage).await;

    let rows = report::leaderboard(&storage, "Open", "Boulder Open")
        .await
        .expect("report");
    let bob = rows
        .iter()
        .find(|row| row.get("competitor_name") == Some(&ReportValue::Text("Bob".into())))
        .expect("Bob is listed");
    for column in ["total", "round_1", "round_2"] {
        assert_eq!(bob.get(column), Some(&ReportValue::Int(0)), "column {column}");
    }
}

#[tokio::test]
async fn scores_from_other_competitions_do_not_leak() {
    let storage = store().await;
    let (alice, _bob) = boulder_open(&storage).await;

    let jam = competition(&storage, "City Jam").await;
    let jam_round = round(&storage, jam, 1).await.expect("jam round");
    let jam_problem = problem(&storage, jam_round, 1).await;
    score(&storage, alice, jam_problem, 100).await;

    let open = report::leaderboard(&storage, "Open", "Boulder Open")
        .await
        .expect("report");
    assert_eq!(open[0].get("total"), Some(&ReportValue::Int(15)));

    let jam_rows = report::leaderboard(&storage, "Open", "City Jam")
        .await
        .expect("report");
    let json = serde_json::to_string(&jam_rows).expect("serialize report");
    assert_eq!(
        json,
        r#"[{"competitor_name":"Alice","total":100,"round_1":100},{"competitor_name":"Bob","total":0,"round_1":0}]"#
    );
}

#[tokio::test]
async fn rows_are_sorted_by_total_descending() {
    let storage = store().await;
    let comp = competition(&storage, "Spring Send").await;
    let open = category(&storage, "Open").await;
    let r1 = round(&storage, comp, 1).await.expect("round");
    let p1 = problem(&storage, r1, 1).await;

    for (name, points) in [("Cleo", 3), ("Dara", 12), ("Eli", 7)] {
        let id = competitor(&storage, name, open).await;
        score(&storage, id, p1, points).await;
    }

    let rows = report::leaderboard(&storage, "Open", "Spring Send")
        .await
        .expect("report");
    let totals: Vec<_> = rows.iter().filter_map(|row| row.get("total").cloned()).collect();
    assert_eq!(
        totals,
        vec![ReportValue::Int(12), ReportValue::Int(7), ReportValue::Int(3)]
    );
}

#[tokio::test]
async fn competition_without_rounds_has_no_round_columns() {
    let storage = store().await;
    boulder_open(&storage).await;
    competition(&storage, "Not Yet Scheduled").await;

    let rows = report::leaderboard(&storage, "Open", "Not Yet Scheduled")
        .await
        .expect("report");
    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["competitor_name", "total"]);
        assert_eq!(row.get("total"), Some(&ReportValue::Int(0)));
    }
}

#[tokio::test]
async fn unknown_competition_fails_before_running_the_report() {
    let storage = store().await;
    boulder_open(&storage).await;

    let err = build_report(&storage, "Open", "Nowhere Cup")
        .await
        .expect_err("unknown competition");
    assert!(matches!(err, ReportError::Build(RoundCountError::NotFound(_))));

    let err = report::leaderboard(&storage, "Open", "Nowhere Cup")
        .await
        .expect_err("unknown competition");
    assert!(matches!(err, ReportError::Build(_)));
}

#[tokio::test]
async fn empty_or_unknown_category_yields_no_rows() {
    let storage = store().await;
    boulder_open(&storage).await;
    category(&storage, "Youth").await;

    for name in ["Youth", "Masters"] {
        let rows = report::leaderboard(&storage, name, "Boulder Open")
            .await
            .expect("report");
        assert!(rows.is_empty(), "category {name}");
    }
}

#[tokio::test]
async fn quotes_in_names_cannot_change_the_statement() {
    let storage = store().await;
    boulder_open(&storage).await;

    let rows = report::leaderboard(&storage, "Open' OR '1'='1", "Boulder Open")
        .await
        .expect("report");
    assert!(rows.is_empty());

    let err = report::leaderboard(&storage, "Open", "Boulder Open'; DROP TABLE scores; --")
        .await
        .expect_err("no such competition");
    assert!(matches!(err, ReportError::Build(RoundCountError::NotFound(_))));

    // The store is untouched and a quoted name that does exist works as data.
    let quoted = competition(&storage, "O'Brien's Cup").await;
    let quoted_round = round(&storage, quoted, 1).await.expect("round");
    let quoted_problem = problem(&storage, quoted_round, 1).await;
    let open_id = storage.list_categories().await.expect("categories")[0].id;
    let finn = competitor(&storage, "Finn", open_id).await;
    score(&storage, finn, quoted_problem, 9).await;

    let rows = report::leaderboard(&storage, "Open", "O'Brien's Cup")
        .await
        .expect("report");
    assert_eq!(rows[0].get("competitor_name"), Some(&ReportValue::Text("Finn".into())));
    assert_eq!(rows[0].get("round_1"), Some(&ReportValue::Int(9)));

    let open_board = report::leaderboard(&storage, "Open", "Boulder Open")
        .await
        .expect("report");
    assert_eq!(open_board[0].get("total"), Some(&ReportValue::Int(15)));
}

#[tokio::test]
async fn round_counter_counts_per_competition() {
    let storage = store().await;
    boulder_open(&storage).await;
    competition(&storage, "Empty Cup").await;

    let counted = storage.count_rounds("Boulder Open").await.expect("count");
    assert_eq!(counted.rounds, 2);
    assert_eq!(counted.highest_number, Some(2));
    assert!(!counted.is_sparse());

    let empty = storage.count_rounds("Empty Cup").await.expect("count");
    assert_eq!(empty.rounds, 0);
    assert_eq!(empty.highest_number, None);

    let missing = storage.count_rounds("Nowhere Cup").await;
    assert!(matches!(missing, Err(RoundCountError::NotFound(_))));
}

#[tokio::test]
async fn sparse_round_numbers_keep_totals_but_not_columns() {
    let storage = store().await;
    let comp = competition(&storage, "Gappy Games").await;
    let open = category(&storage, "Open").await;
    let r1 = round(&storage, comp, 1).await.expect("round 1");
    let r3 = round(&storage, comp, 3).await.expect("round 3");
    let p1 = problem(&storage, r1, 1).await;
    let p3 = problem(&storage, r3, 1).await;
    let gil = competitor(&storage, "Gil", open).await;
    score(&storage, gil, p1, 4).await;
    score(&storage, gil, p3, 6).await;

    let counted = storage.count_rounds("Gappy Games").await.expect("count");
    assert!(counted.is_sparse());

    let rows = report::leaderboard(&storage, "Open", "Gappy Games")
        .await
        .expect("report");
    assert_eq!(rows[0].get("total"), Some(&ReportValue::Int(10)));
    assert_eq!(rows[0].get("round_1"), Some(&ReportValue::Int(4)));
    assert_eq!(rows[0].get("round_2"), Some(&ReportValue::Int(0)));
    assert_eq!(rows[0].get("round_3"), None);
}

#[tokio::test]
async fn duplicate_round_numbers_are_rejected() {
    let storage = store().await;
    let comp = competition(&storage, "Twice Cup").await;
    round(&storage, comp, 1).await.expect("round 1");

    let err = round(&storage, comp, 1).await.expect_err("duplicate round");
    match err {
        BoardError::DatabaseError(sqlx::Error::Database(db_err)) => {
            assert!(db_err.is_unique_violation())
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
