//! End-to-end turns on the default 600x500 board with 10-unit cells

use grid_snake::game::{
    Action, CollisionType, Direction, GameConfig, GameEngine, GameState, Point, Snake,
};

fn new_game(seed: u64) -> (GameEngine, GameState) {
    let mut engine = GameEngine::with_seed(GameConfig::default(), seed).unwrap();
    let state = engine.reset();
    (engine, state)
}

#[test]
fn test_initial_layout() {
    let (_, state) = new_game(1);

    assert_eq!(state.snake.head(), Point::new(300, 250));
    assert_eq!(
        state.snake.body,
        [Point::new(300, 250), Point::new(290, 250), Point::new(280, 250)]
    );
    assert_eq!(state.snake.direction, Direction::Right);
    assert_eq!(state.score, 0);
    assert!(!state.snake.occupies(state.food));
}

#[test]
fn test_single_step_without_input() {
    let (mut engine, mut state) = new_game(2);
    if state.food == Point::new(310, 250) {
        state.food = Point::new(0, 0);
    }

    let result = engine.play_step(&mut state, Action::Continue);

    assert!(!result.game_over);
    assert_eq!(result.score, 0);
    assert_eq!(state.snake.head(), Point::new(310, 250));
    assert_eq!(
        state.snake.body,
        [Point::new(310, 250), Point::new(300, 250), Point::new(290, 250)]
    );
}

#[test]
fn test_running_right_hits_the_wall() {
    let (mut engine, mut state) = new_game(3);
    state.food = Point::new(0, 0);

    let mut turns = 0;
    loop {
        let result = engine.play_step(&mut state, Action::Move(Direction::Right));
        turns += 1;
        if result.game_over {
            assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
            break;
        }
        assert!(state.snake.head().x <= 590);
    }

    // 300 -> 590 takes 29 turns, the 30th lands on x = 600
    assert_eq!(turns, 30);
    assert_eq!(state.snake.head(), Point::new(600, 250));
    assert!(state.is_game_over());
}

#[test]
fn test_running_left_hits_the_wall() {
    let (mut engine, mut state) = new_game(4);
    state.food = Point::new(590, 0);

    // Turn up first; a direct reversal would be ignored
    engine.play_step(&mut state, Action::Move(Direction::Up));
    let mut result = engine.play_step(&mut state, Action::Move(Direction::Left));
    while !result.game_over {
        result = engine.play_step(&mut state, Action::Continue);
    }

    assert_eq!(state.snake.head().x, -10);
    assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
}

#[test]
fn test_eating_grows_by_one() {
    let (mut engine, mut state) = new_game(5);
    state.food = Point::new(310, 250);

    let before = state.snake.len();
    let result = engine.play_step(&mut state, Action::Continue);

    assert!(result.info.ate_food);
    assert_eq!(result.score, 1);
    assert_eq!(state.snake.len(), before + 1);

    // Next turn without food keeps the new length
    if state.food == state.snake.next_head(10) {
        state.food = Point::new(0, 0);
    }
    let result = engine.play_step(&mut state, Action::Continue);
    assert!(!result.info.ate_food);
    assert_eq!(state.snake.len(), before + 1);
}

#[test]
fn test_eat_a_row_of_food() {
    let (mut engine, mut state) = new_game(6);

    for expected in 1..=5 {
        state.food = state.snake.next_head(10);
        let result = engine.play_step(&mut state, Action::Continue);
        assert_eq!(result.score, expected);
    }

    assert_eq!(state.snake.len(), 8);
    assert_eq!(state.score, 5);
}

#[test]
fn test_curling_into_itself_ends_the_game() {
    let (mut engine, _) = new_game(7);
    let board = engine.board();
    let snake = Snake::new(Point::new(300, 250), Direction::Right, 5, 10);
    let mut state = GameState::new(snake, Point::new(0, 0), board);

    let moves = [Direction::Down, Direction::Left, Direction::Up];
    let results: Vec<_> = moves
        .into_iter()
        .map(|direction| engine.play_step(&mut state, Action::Move(direction)))
        .collect();

    assert!(!results[0].game_over);
    assert!(!results[1].game_over);
    assert!(results[2].game_over);
    assert_eq!(
        results[2].info.collision_type,
        Some(CollisionType::SelfCollision)
    );
}

#[test]
fn test_no_turns_after_game_over() {
    let (mut engine, mut state) = new_game(8);
    state.food = Point::new(0, 0);
    while !engine.play_step(&mut state, Action::Continue).game_over {}

    let frozen = state.clone();
    for direction in Direction::ALL {
        let result = engine.play_step(&mut state, Action::Move(direction));
        assert!(result.game_over);
    }
    assert_eq!(state, frozen);
}

#[test]
fn test_non_multiple_board_is_truncated() {
    let config = GameConfig::new(605, 503);
    let mut engine = GameEngine::with_seed(config, 9).unwrap();
    let mut state = engine.reset();
    state.food = Point::new(0, 0);

    assert_eq!(state.snake.head(), Point::new(300, 250));
    let mut turns = 0;
    while !engine.play_step(&mut state, Action::Continue).game_over {
        turns += 1;
    }
    assert_eq!(turns, 29);
}
