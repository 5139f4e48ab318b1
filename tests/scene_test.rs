//! Scene composition for each mode, checked against the recorded display list

use flappy_bird::renderer::{DisplayList, DrawCmd, draw_scene};
use flappy_bird::sim::{GameSession, Mode, Obstacle, TickInput, tick};
use flappy_bird::{MemoryStore, Settings};

fn frame(session: &GameSession) -> DisplayList {
    let mut list = DisplayList::new();
    draw_scene(session, &mut list);
    list
}

fn body_circles(list: &DisplayList) -> usize {
    list.commands
        .iter()
        .filter(|cmd| matches!(cmd, DrawCmd::FillCircle { radius, .. } if *radius == 15.0))
        .count()
}

#[test]
fn test_start_screen() {
    let session = GameSession::new(Settings::default(), 1, 0);
    let list = frame(&session);

    assert_eq!(
        list.commands[0],
        DrawCmd::Clear {
            width: 400.0,
            height: 600.0
        }
    );
    assert_eq!(body_circles(&list), 1);
    assert_eq!(
        list.texts(),
        vec!["Flappy Bird", "Press SPACE or Click", "to Start"]
    );
}

#[test]
fn test_playing_has_no_overlay() {
    let mut session = GameSession::new(Settings::default(), 1, 0);
    let mut store = MemoryStore::new();
    tick(&mut session, &TickInput::activate(), &mut store);
    session.obstacles.push(Obstacle::new(250.0, 100.0, 150.0, 60.0));

    let list = frame(&session);
    assert!(list.texts().is_empty());
    assert_eq!(body_circles(&list), 1);

    let strokes = list
        .commands
        .iter()
        .filter(|cmd| matches!(cmd, DrawCmd::StrokeRect { .. }))
        .count();
    // Two segments and two caps per obstacle
    assert_eq!(strokes, 4);
}

#[test]
fn test_game_over_shows_pending_best() {
    let mut session = GameSession::new(Settings::default(), 1, 1);
    let mut store = MemoryStore::new();
    tick(&mut session, &TickInput::activate(), &mut store);
    for _ in 0..3 {
        session.obstacles.push(Obstacle::new(0.0, 0.0, 600.0, 60.0));
    }
    tick(&mut session, &TickInput::default(), &mut store);
    session.body.pos.y = session.body.floor_limit();
    session.body.vel = 2.0;
    tick(&mut session, &TickInput::default(), &mut store);
    assert_eq!(session.mode(), Mode::Over);

    let list = frame(&session);
    assert_eq!(
        list.texts(),
        vec![
            "Game Over!",
            "Score: 3",
            "Best: 3",
            "Click Restart to play again"
        ]
    );
}
