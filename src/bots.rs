//! Computer players. They see the game only through `&GameState` and steer
//! with the same actions a keyboard produces.

use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::device::InputDevice;
use crate::error::SnekError;
use crate::geometry::Direction;
use crate::state::GameState;

/// Directions whose next cell is free room and not covered by the snake.
pub fn valid_actions(game: &GameState) -> Vec<Direction> {
    let head = game.snake().head();
    Direction::ALL
        .into_iter()
        .filter(|&dir| {
            let pos = head + dir;
            game.room().is_free(pos) && !game.snake().occupies(pos)
        })
        .collect()
}

/// Wanders by picking a random safe direction every tick.
pub struct RandomBot<R = ThreadRng> {
    rng: R,
}

impl RandomBot<ThreadRng> {
    pub fn new() -> Self {
        RandomBot::with_rng(rand::thread_rng())
    }
}

impl Default for RandomBot<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomBot<R> {
    pub fn with_rng(rng: R) -> Self {
        RandomBot { rng }
    }
}

impl<R: Rng> InputDevice for RandomBot<R> {
    fn get_actions(&mut self, game: &GameState) -> Result<Vec<Direction>, SnekError> {
        Ok(valid_actions(game)
            .choose(&mut self.rng)
            .map(|dir| vec![*dir])
            .unwrap_or_default())
    }
}

/// Greedily takes the safe direction that gets closest to the egg.
#[derive(Debug, Default)]
pub struct EggSeekerBot;

impl EggSeekerBot {
    pub fn new() -> Self {
        EggSeekerBot
    }
}

impl InputDevice for EggSeekerBot {
    fn get_actions(&mut self, game: &GameState) -> Result<Vec<Direction>, SnekError> {
        let head = game.snake().head();
        let egg = game.egg();
        // Ties go to the first direction in `Direction::ALL` order
        Ok(valid_actions(game)
            .into_iter()
            .min_by_key(|&dir| (head + dir).manhattan_distance(egg))
            .map(|dir| vec![dir])
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Pos;
    use crate::room::Room;
    use crate::snake::Snake;
    use crate::state::EggPlacement;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn game_in(layout: &str, head: (i32, i32), length: usize, egg: (i32, i32)) -> GameState {
        let room = Room::from_layout(layout).unwrap();
        let snake = Snake::new(head.into(), Direction::Right, length).unwrap();
        GameState::new(room, snake, EggPlacement::Anywhere, &mut StdRng::seed_from_u64(5))
            .with_egg(egg.into())
    }

    const OPEN: &str = "
        .....
        .....
        .....
        .....
        .....
    ";

    #[test]
    fn test_valid_actions_in_open_room() {
        let game = game_in(OPEN, (2, 2), 1, (0, 0));
        assert_eq!(valid_actions(&game), Direction::ALL.to_vec());
    }

    #[test]
    fn test_valid_actions_respect_edges_and_walls() {
        let game = game_in(
            "
            .#...
            .....
            ",
            (0, 0),
            1,
            (4, 1),
        );
        // Up and Left leave the room, Right is a wall
        assert_eq!(valid_actions(&game), vec![Direction::Down]);
    }

    #[test]
    fn test_valid_actions_avoid_own_body() {
        let mut game = game_in(OPEN, (1, 2), 3, (0, 0));
        let mut rng = StdRng::seed_from_u64(1);
        game.step(&mut rng);
        game.step(&mut rng);
        // Body now runs (3,2) (2,2) (1,2)
        let actions = valid_actions(&game);
        assert!(!actions.contains(&Direction::Left));
        assert_eq!(actions, vec![Direction::Up, Direction::Down, Direction::Right]);
    }

    #[test]
    fn test_random_bot_picks_only_safe_moves() {
        let game = game_in(
            "
            ...
            .#.
            ...
            ",
            (0, 1),
            1,
            (2, 2),
        );
        let mut bot = RandomBot::with_rng(StdRng::seed_from_u64(9));

        for _ in 0..50 {
            let actions = bot.get_actions(&game).unwrap();
            assert_eq!(actions.len(), 1);
            assert!(matches!(actions[0], Direction::Up | Direction::Down));
        }
    }

    #[test]
    fn test_unseeded_random_bot() {
        let game = game_in(OPEN, (0, 0), 1, (4, 4));
        let actions = RandomBot::default().get_actions(&game).unwrap();
        assert!(actions == vec![Direction::Down] || actions == vec![Direction::Right]);
    }

    #[test]
    fn test_boxed_in_bots_do_nothing() {
        let game = game_in("#.#", (1, 0), 1, (0, 0));
        assert!(valid_actions(&game).is_empty());

        let mut random = RandomBot::with_rng(StdRng::seed_from_u64(2));
        assert!(random.get_actions(&game).unwrap().is_empty());
        assert!(EggSeekerBot::new().get_actions(&game).unwrap().is_empty());
    }

    #[test]
    fn test_egg_seeker_heads_for_egg() {
        let game = game_in(OPEN, (1, 2), 1, (4, 2));
        assert_eq!(
            EggSeekerBot::new().get_actions(&game).unwrap(),
            vec![Direction::Right]
        );

        let game = game_in(OPEN, (2, 3), 1, (2, 0));
        assert_eq!(
            EggSeekerBot::new().get_actions(&game).unwrap(),
            vec![Direction::Up]
        );
    }

    #[test]
    fn test_egg_seeker_breaks_ties_in_direction_order() {
        let game = game_in(OPEN, (2, 2), 1, (3, 3));
        // Down and Right are both one step closer
        assert_eq!(
            EggSeekerBot::new().get_actions(&game).unwrap(),
            vec![Direction::Down]
        );
    }

    #[test]
    fn test_egg_seeker_eats_egg() {
        let mut game = game_in(OPEN, (0, 0), 1, (3, 4));
        let mut bot = EggSeekerBot::new();
        let mut rng = StdRng::seed_from_u64(4);

        for _ in 0..7 {
            let actions = bot.get_actions(&game).unwrap();
            game.process_actions(actions);
            game.step(&mut rng);
        }

        assert_eq!(game.score(), 1);
        assert!(!game.is_over());
    }

    #[test]
    fn test_bots_do_not_mutate_game() {
        let game = game_in(OPEN, (2, 2), 2, (4, 4));
        let before = game.clone();

        EggSeekerBot::new().get_actions(&game).unwrap();
        RandomBot::with_rng(StdRng::seed_from_u64(0))
            .get_actions(&game)
            .unwrap();

        assert_eq!(game, before);
        assert_eq!(game.snake().direction(), Direction::Right);
        assert_eq!(Pos::new(2, 2), game.snake().head());
    }
}
