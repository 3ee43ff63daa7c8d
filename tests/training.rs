//! End-to-end training runs exercising the learner, the policy, and the
//! game driver together.

use td_tictactoe::{
    Player, RandomAgent, TdAgent, Trainer, TrainerConfig, TrainingReport,
};

fn config(games: usize) -> TrainerConfig {
    TrainerConfig {
        games,
        progress: false,
    }
}

#[test]
fn self_play_runs_to_completion() {
    let mut first = TdAgent::new(Player::One).with_seed(7);
    let mut second = TdAgent::new(Player::Two).with_seed(8);

    let report = Trainer::new(config(500))
        .run(&mut first, &mut second)
        .unwrap();

    assert_eq!(report.total_games, 500);
    assert_eq!(report.wins + report.draws + report.losses, 500);

    // Both agents saw every game and left nothing mid-flight.
    assert_eq!(first.record().len(), 500);
    assert_eq!(second.record().len(), 500);
    assert_eq!(first.trajectory_len(), 0);
    assert_eq!(second.trajectory_len(), 0);

    // Learned estimates accumulated on both sides.
    assert!(first.values().len() > 100);
    assert!(second.values().len() > 100);
}

#[test]
fn learner_beats_a_random_opponent() {
    let mut learner = TdAgent::new(Player::One).with_seed(21);
    let mut opponent = RandomAgent::with_seed(22);

    let report = Trainer::new(config(500))
        .run(&mut learner, &mut opponent)
        .unwrap();

    // First-move advantage plus learning: a tie with random play would
    // already be a regression.
    assert!(report.wins > report.losses);
    assert!(report.win_rate > report.loss_rate);
}

#[test]
fn second_seat_learner_improves_over_the_run() {
    let mut opponent = RandomAgent::with_seed(31);
    let mut learner = TdAgent::new(Player::Two).with_seed(32);

    let early = Trainer::new(config(300))
        .run(&mut opponent, &mut learner)
        .unwrap();
    let late = Trainer::new(config(300))
        .run(&mut opponent, &mut learner)
        .unwrap();

    // Tallies are counted for player one, so the learner wants fewer
    // wins in the later block. Not-worse is the safe claim for a
    // stochastic policy over a few hundred games.
    assert!(late.wins <= early.wins + 30);
    assert_eq!(learner.record().len(), 600);
}

#[test]
fn report_survives_a_save_and_reload() {
    let report = TrainingReport::new(200, 120, 50, 30);
    let path = std::env::temp_dir().join(format!(
        "td-tictactoe-report-{}.json",
        std::process::id()
    ));

    report.save(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    let reloaded: TrainingReport = serde_json::from_str(&text).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(reloaded.total_games, 200);
    assert_eq!(reloaded.wins, 120);
    assert_eq!(reloaded.draws, 50);
    assert_eq!(reloaded.losses, 30);
    assert!((reloaded.win_rate - 0.6).abs() < 1e-12);
}
