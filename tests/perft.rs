use lib::chess::Game;
use rayon::prelude::*;

fn perft(game: &Game, depth: u8) -> usize {
    match depth {
        0 => 1,
        1 => game.moves().count(),
        d => game
            .moves()
            .par_bridge()
            .map(|m| {
                let mut next = game.clone();
                assert!(next.request_move(m).is_ok());
                perft(&next, d - 1)
            })
            .sum(),
    }
}

#[cfg(not(tarpaulin))]
#[test]
fn perft_expands_expected_number_of_nodes() {
    // Initial position
    let game = Game::default();
    assert_eq!(perft(&game, 1), 44);
    assert_eq!(perft(&game, 2), 1920);
    assert_eq!(perft(&game, 3), 79666);
}
