use rand::rngs::StdRng;
use rand::SeedableRng;

use run_with_mind::player::POWERUP_SCORE;
use run_with_mind::{Direction, LevelGenerator, Pos, Session, Status};

/// Walks the guaranteed corridor: right along row 1, then down to the exit.
fn corridor_route() -> Vec<Direction> {
    let mut route = vec![Direction::Right; 17];
    route.extend(vec![Direction::Down; 17]);
    route
}

#[test]
fn enemy_on_the_corridor_catches_a_corridor_runner() {
    // Level one always spawns an enemy at the far end of row 1.
    let mut rng = StdRng::seed_from_u64(10);
    let mut session = Session::new(LevelGenerator::default(), &mut rng);
    assert!(session.state().enemy_at(Pos::new(1, 18)));

    let mut status = Status::InProgress;
    for dir in corridor_route() {
        status = session.step(dir).status;
        if status != Status::InProgress {
            break;
        }
    }
    assert_eq!(status, Status::GameOver);
    assert!(session.state().game_over);
}

#[test]
fn blocked_moves_never_change_counters() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut session = Session::new(LevelGenerator::default(), &mut rng);
    let before = session.state().clone();
    let report = session.step(Direction::Left);
    assert!(!report.moved);
    assert_eq!(session.state(), &before);
}

#[test]
fn powerup_pickup_scores_exactly_once() {
    let mut rng = StdRng::seed_from_u64(12);
    let mut session = Session::new(LevelGenerator::default(), &mut rng);
    let mut state = session.state().clone();
    state.enemies.clear();
    state.powerups = vec![Pos::new(1, 2), Pos::new(1, 3), Pos::new(3, 16)];
    session.restore(state);

    let report = session.step(Direction::Right);
    assert_eq!(report.powerup, Some(Pos::new(1, 2)));
    assert_eq!(session.state().score, POWERUP_SCORE);
    assert_eq!(session.state().powerups, vec![Pos::new(1, 3), Pos::new(3, 16)]);

    session.step(Direction::Left);
    session.step(Direction::Right);
    assert_eq!(session.state().score, POWERUP_SCORE);
}

#[test]
fn finishing_both_levels_wins() {
    let mut rng = StdRng::seed_from_u64(13);
    let mut session = Session::new(LevelGenerator::default(), &mut rng);

    for level in [1, 2] {
        let mut state = session.state().clone();
        state.enemies.clear();
        session.restore(state);
        let mut status = Status::InProgress;
        for dir in corridor_route() {
            status = session.step(dir).status;
        }
        if level == 1 {
            assert_eq!(status, Status::LevelComplete);
            assert!(session.next_level(&mut rng));
            assert_eq!(session.state().level, 2);
            assert_eq!(session.state().score, 0);
            assert_eq!(session.state().total_moves, 0);
        } else {
            assert_eq!(status, Status::GameWon);
            assert!(status.is_terminal());
            assert!(!session.next_level(&mut rng));
        }
    }
}
