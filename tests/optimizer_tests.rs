use chrono::{Duration, NaiveDate};
use portfolio_tool::{
    OptimizeStrategy, OptimizerConfig, Project, ProjectStatus, ResourcePoolItem, Task,
    TaskPriority, optimize_schedule, optimize_schedule_with_dependencies,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn project() -> Project {
    Project::new(
        "p1",
        "Platform rollout",
        d(2024, 1, 1),
        d(2024, 3, 31),
        ProjectStatus::Active,
    )
}

fn dev1_pool() -> Vec<ResourcePoolItem> {
    vec![ResourcePoolItem::new("dev1", "Developer 1", 1)]
}

#[test]
fn smoothing_shifts_the_lower_priority_task_and_keeps_the_end_date() {
    // T1 and T2 overlap on dev1 (capacity 1). T1 is P1, T2 is P0, so T1 is
    // the one that moves, and only as far as its float allows.
    let tasks = vec![
        Task::new(
            "T1",
            "Build ingestion",
            d(2024, 1, 1),
            d(2024, 1, 5),
            "dev1",
            TaskPriority::P1,
        ),
        Task::new(
            "T2",
            "Fix production bug",
            d(2024, 1, 3),
            d(2024, 1, 7),
            "dev1",
            TaskPriority::P0,
        ),
    ];
    let result = optimize_schedule(&project(), &tasks, &dev1_pool(), OptimizeStrategy::Smoothing);

    assert_eq!(result.tasks[0].start_date, d(2024, 1, 3));
    assert_eq!(result.tasks[0].end_date, d(2024, 1, 7));
    assert_eq!(result.tasks[1], tasks[1]);

    assert_eq!(result.changes.len(), 1);
    assert_eq!(result.changes[0].task_id, "T1");
    assert_eq!(result.changes[0].original_start, d(2024, 1, 1));
    assert_eq!(result.changes[0].new_start, d(2024, 1, 3));
    assert_eq!(result.changes[0].delay_days, 2);
    assert!(result.changes[0].reason.contains("float"));

    assert_eq!(result.metrics.original_duration_days, 6);
    assert_eq!(result.metrics.new_duration_days, 6);
    // T1 landed exactly on T2's range: the overlap grew from three unit-days
    // to five, so the window held but net contention got worse.
    assert_eq!(result.metrics.conflicts_resolved, -2);
}

#[test]
fn smoothing_preserves_the_end_date_on_a_three_way_pileup() {
    // a(P2), b(P1), c(P0) stack up on dev1 across early January. Smoothing
    // burns float lowest-priority-first and must never extend the window.
    let tasks = vec![
        Task::new("a", "Cleanup", d(2024, 1, 1), d(2024, 1, 4), "dev1", TaskPriority::P2),
        Task::new("b", "Refactor", d(2024, 1, 2), d(2024, 1, 5), "dev1", TaskPriority::P1),
        Task::new("c", "Launch", d(2024, 1, 3), d(2024, 1, 6), "dev1", TaskPriority::P0),
    ];
    let result = optimize_schedule(&project(), &tasks, &dev1_pool(), OptimizeStrategy::Smoothing);

    assert_eq!(result.metrics.original_duration_days, 5);
    assert_eq!(result.metrics.new_duration_days, 5);
    // All three tasks end up stacked on Jan 3-6 (overload grows from six
    // unit-days to eight), the price of never touching the end date.
    assert_eq!(result.metrics.conflicts_resolved, -2);

    // c had no float and stayed put; a and b spent theirs entirely.
    assert_eq!(result.tasks[0].start_date, d(2024, 1, 3));
    assert_eq!(result.tasks[1].start_date, d(2024, 1, 3));
    assert_eq!(result.tasks[2], tasks[2]);
    let ends: Vec<NaiveDate> = result.tasks.iter().map(|t| t.end_date).collect();
    assert!(ends.iter().all(|end| *end <= d(2024, 1, 6)));
}

#[test]
fn leveling_eliminates_overlap_where_smoothing_only_relocates_it() {
    let tasks = vec![
        Task::new("a", "Cleanup", d(2024, 1, 1), d(2024, 1, 4), "dev1", TaskPriority::P2),
        Task::new("b", "Refactor", d(2024, 1, 2), d(2024, 1, 5), "dev1", TaskPriority::P1),
        Task::new("c", "Launch", d(2024, 1, 3), d(2024, 1, 6), "dev1", TaskPriority::P0),
    ];
    let smoothing =
        optimize_schedule(&project(), &tasks, &dev1_pool(), OptimizeStrategy::Smoothing);
    let leveling = optimize_schedule(&project(), &tasks, &dev1_pool(), OptimizeStrategy::Leveling);

    // Leveling spreads a and b past the old end date, taking the six original
    // overload unit-days down to two; smoothing compresses them instead.
    assert_eq!(leveling.metrics.conflicts_resolved, 4);
    assert_eq!(smoothing.metrics.conflicts_resolved, -2);
    assert!(leveling.metrics.conflicts_resolved > smoothing.metrics.conflicts_resolved);

    assert_eq!(leveling.metrics.new_duration_days, 11);
    assert!(leveling.metrics.new_duration_days >= leveling.metrics.original_duration_days);
    // The P0 task is the last to be disturbed under either strategy.
    assert_eq!(leveling.tasks[2], tasks[2]);
}

// Knuth's MMIX constants; enough spread to vary the fixtures.
fn lcg(state: &mut u64) -> u64 {
    *state = state
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    *state >> 33
}

fn generated_tasks(seed: u64) -> Vec<Task> {
    let mut state = seed.wrapping_add(0x9e3779b97f4a7c15);
    let count = 4 + (lcg(&mut state) % 4) as usize;
    (0..count)
        .map(|i| {
            let start = d(2024, 1, 1) + Duration::days((lcg(&mut state) % 20) as i64);
            let end = start + Duration::days(1 + (lcg(&mut state) % 6) as i64);
            let assignee = if lcg(&mut state) % 2 == 0 { "dev1" } else { "dev2" };
            let priority = match lcg(&mut state) % 3 {
                0 => TaskPriority::P0,
                1 => TaskPriority::P1,
                _ => TaskPriority::P2,
            };
            Task::new(format!("t{i}"), format!("Task {i}"), start, end, assignee, priority)
        })
        .collect()
}

fn two_dev_pool() -> Vec<ResourcePoolItem> {
    vec![
        ResourcePoolItem::new("dev1", "Developer 1", 1),
        ResourcePoolItem::new("dev2", "Developer 2", 1),
    ]
}

#[test]
fn leveling_never_eliminates_fewer_conflicts_than_smoothing() {
    // Forty small generated schedules over two single-capacity developers.
    // A per-shift count fails this on schedules where smoothing burns float
    // chasing an overlap it never clears; eliminated unit-days do not.
    for seed in 0..40u64 {
        let tasks = generated_tasks(seed);
        let smoothing =
            optimize_schedule(&project(), &tasks, &two_dev_pool(), OptimizeStrategy::Smoothing);
        let leveling =
            optimize_schedule(&project(), &tasks, &two_dev_pool(), OptimizeStrategy::Leveling);

        assert!(
            leveling.metrics.conflicts_resolved >= smoothing.metrics.conflicts_resolved,
            "seed {}: leveling eliminated {}, smoothing {}",
            seed,
            leveling.metrics.conflicts_resolved,
            smoothing.metrics.conflicts_resolved
        );

        let original_end = tasks.iter().map(|t| t.end_date).max();
        let smoothed_end = smoothing.tasks.iter().map(|t| t.end_date).max();
        assert_eq!(
            smoothed_end, original_end,
            "seed {seed}: smoothing moved the end date"
        );
        assert_eq!(
            smoothing.metrics.new_duration_days, smoothing.metrics.original_duration_days,
            "seed {seed}: smoothing changed the reported duration"
        );
    }
}

#[test]
fn optimizing_a_conflict_free_schedule_changes_nothing() {
    let tasks = vec![
        Task::new("a", "Design", d(2024, 1, 1), d(2024, 1, 3), "dev1", TaskPriority::P1),
        Task::new("b", "Build", d(2024, 1, 4), d(2024, 1, 8), "dev1", TaskPriority::P1),
        Task::new("c", "Ship", d(2024, 1, 9), d(2024, 1, 10), "dev1", TaskPriority::P0),
    ];
    for strategy in [OptimizeStrategy::Smoothing, OptimizeStrategy::Leveling] {
        let result = optimize_schedule(&project(), &tasks, &dev1_pool(), strategy);
        assert_eq!(result.tasks, tasks);
        assert!(result.changes.is_empty());
        assert_eq!(result.metrics.conflicts_resolved, 0);
        assert_eq!(result.metrics.peak_overload_reduced, 0);
    }
}

#[test]
fn a_second_smoothing_pass_finds_no_float_left_to_spend() {
    let tasks = vec![
        Task::new("T1", "Build", d(2024, 1, 1), d(2024, 1, 5), "dev1", TaskPriority::P1),
        Task::new("T2", "Fix", d(2024, 1, 3), d(2024, 1, 7), "dev1", TaskPriority::P0),
    ];
    let first = optimize_schedule(&project(), &tasks, &dev1_pool(), OptimizeStrategy::Smoothing);
    let second = optimize_schedule(
        &project(),
        &first.tasks,
        &dev1_pool(),
        OptimizeStrategy::Smoothing,
    );

    assert_eq!(second.tasks, first.tasks);
    assert!(second.changes.is_empty());
    assert_eq!(second.metrics.conflicts_resolved, 0);
}

#[test]
fn explicit_dependencies_and_config_flow_through_the_entry_point() {
    // a -> b with a four-day gap; an unrelated long task d competes with a.
    let tasks = vec![
        Task::new("a", "Prep", d(2024, 1, 1), d(2024, 1, 3), "dev1", TaskPriority::P1),
        Task::new("b", "Follow-up", d(2024, 1, 5), d(2024, 1, 7), "dev1", TaskPriority::P1),
        Task::new("d", "Long haul", d(2024, 1, 1), d(2024, 1, 7), "dev1", TaskPriority::P1),
    ];
    let edges = vec![("a".to_string(), "b".to_string())];
    let result = optimize_schedule_with_dependencies(
        &project(),
        &tasks,
        &edges,
        &dev1_pool(),
        OptimizeStrategy::Smoothing,
        OptimizerConfig::default(),
    );

    // a may approach but never reach b's start.
    assert_eq!(result.tasks[0].start_date, d(2024, 1, 2));
    assert_eq!(result.tasks[0].end_date, d(2024, 1, 4));
    assert_eq!(result.tasks[1], tasks[1]);
    assert_eq!(result.metrics.new_duration_days, 6);
}

#[test]
fn optimization_results_serialize_for_downstream_consumers() {
    let tasks = vec![
        Task::new("T1", "Build", d(2024, 1, 1), d(2024, 1, 5), "dev1", TaskPriority::P1),
        Task::new("T2", "Fix", d(2024, 1, 3), d(2024, 1, 7), "dev1", TaskPriority::P0),
    ];
    let result = optimize_schedule(&project(), &tasks, &dev1_pool(), OptimizeStrategy::Smoothing);
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["metrics"]["conflicts_resolved"], -2);
    assert_eq!(value["changes"][0]["task_id"], "T1");
    assert_eq!(value["changes"][0]["delay_days"], 2);
    assert_eq!(value["tasks"][1]["priority"], "P0");
    assert_eq!(value["tasks"][0]["start_date"], "2024-01-03");
}
