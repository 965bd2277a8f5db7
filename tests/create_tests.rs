mod common;

use common::{init_db, run, setup_test_db};

#[test]
fn create_schedule_from_natural_phrase() {
    let db = setup_test_db("create_natural");
    init_db(&db);

    // "3pm tomorrow" relative to Monday 2025-03-10 09:00
    let out = run(
        &db,
        &[
            "create",
            "Họp nhóm",
            "--kind",
            "schedule",
            "--start",
            "3h chiều mai",
        ],
    );

    assert!(out.contains("✅"), "stdout: {out}");
    assert!(out.contains("Họp nhóm"), "stdout: {out}");
    // end defaults to one hour after start
    assert!(
        out.contains("2025-03-11 15:00 -> 2025-03-11 16:00"),
        "stdout: {out}"
    );
    assert!(!out.contains("overlaps"), "stdout: {out}");
}

#[test]
fn create_warns_on_overlap_but_still_succeeds() {
    let db = setup_test_db("create_overlap");
    init_db(&db);

    run(
        &db,
        &[
            "create",
            "Họp lãnh đạo",
            "--kind",
            "schedule",
            "--start",
            "2025-03-11 14:00",
            "--end",
            "2025-03-11 15:30",
        ],
    );

    let out = run(
        &db,
        &[
            "create",
            "Họp dự án",
            "--kind",
            "schedule",
            "--start",
            "từ 14h đến 15h30 ngày mai",
        ],
    );

    // created anyway, with the clash spelled out
    assert!(out.contains("✅"), "stdout: {out}");
    assert!(out.contains("Họp dự án"), "stdout: {out}");
    assert!(out.contains("⚠️"), "stdout: {out}");
    assert!(out.contains("Họp lãnh đạo"), "stdout: {out}");

    // both events exist
    let list = run(&db, &["list", "--limit", "10"]);
    assert!(list.contains("Họp lãnh đạo"), "stdout: {list}");
    assert!(list.contains("Họp dự án"), "stdout: {list}");
}

#[test]
fn create_deadline_skips_schedule_and_conflicts() {
    let db = setup_test_db("create_deadline");
    init_db(&db);

    // a meeting sitting exactly on the due time
    run(
        &db,
        &[
            "create",
            "Họp tổng kết",
            "--kind",
            "schedule",
            "--start",
            "2025-03-14 16:30",
            "--end",
            "2025-03-14 17:30",
        ],
    );

    let out = run(
        &db,
        &[
            "create",
            "Nộp báo cáo tháng 3",
            "--kind",
            "deadline",
            "--end",
            "17h thứ 6 tuần này",
            "--priority",
            "cao",
        ],
    );

    assert!(out.contains("✅"), "stdout: {out}");
    assert!(out.contains("due 2025-03-14 17:00"), "stdout: {out}");
    assert!(out.contains("priority: high"), "stdout: {out}");
    // deadlines never join the conflict check
    assert!(!out.contains("⚠️"), "stdout: {out}");
}

#[test]
fn create_rejects_unknown_kind() {
    let db = setup_test_db("create_bad_kind");
    init_db(&db);

    let out = run(&db, &["create", "X", "--kind", "banquet"]);
    assert!(out.contains("❌"), "stdout: {out}");
    assert!(out.contains("banquet"), "stdout: {out}");
}

#[test]
fn create_reports_unparseable_time() {
    let db = setup_test_db("create_bad_time");
    init_db(&db);

    let out = run(&db, &["create", "X", "--start", "lúc nào đó"]);
    assert!(out.contains("❌"), "stdout: {out}");
    assert!(out.contains("Could not understand"), "stdout: {out}");

    // nothing was committed
    let list = run(&db, &["list", "--limit", "10"]);
    assert!(list.contains("No items found"), "stdout: {list}");
}

#[test]
fn untimed_task_is_allowed() {
    let db = setup_test_db("create_untimed");
    init_db(&db);

    let out = run(&db, &["create", "Ôn thi cuối kỳ"]);
    assert!(out.contains("✅"), "stdout: {out}");

    let list = run(&db, &["list", "--kind", "task"]);
    assert!(list.contains("Ôn thi cuối kỳ"), "stdout: {list}");
}
