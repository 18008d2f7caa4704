//! Key bindings from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Keys bound to each action. Letters are listed lowercase and match either case.
pub const BINDINGS: &[(GameAction, &[KeyCode])] = &[
    (
        GameAction::MoveLeft,
        &[KeyCode::Left, KeyCode::Char('h'), KeyCode::Char('a')],
    ),
    (
        GameAction::MoveRight,
        &[KeyCode::Right, KeyCode::Char('l'), KeyCode::Char('d')],
    ),
    (
        GameAction::SoftDrop,
        &[KeyCode::Down, KeyCode::Char('j'), KeyCode::Char('s')],
    ),
    (GameAction::HardDrop, &[KeyCode::Char(' ')]),
    (
        GameAction::RotateCw,
        &[KeyCode::Up, KeyCode::Char('k'), KeyCode::Char('w')],
    ),
    (GameAction::RotateCcw, &[KeyCode::Char('z'), KeyCode::Char('y')]),
    (GameAction::Pause, &[KeyCode::Char('p')]),
    (GameAction::Restart, &[KeyCode::Char('r')]),
];

const QUIT_KEY: KeyCode = KeyCode::Char('q');

fn fold_case(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Map a key press to the action bound to it.
///
/// Releases are ignored so terminals that report them do not double every
/// command. Chords with Ctrl or Alt are never game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.kind == KeyEventKind::Release
        || key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    let code = fold_case(key.code);
    BINDINGS
        .iter()
        .find(|(_, keys)| keys.contains(&code))
        .map(|&(action, _)| action)
}

/// True for `q` in either case and for Ctrl-C.
pub fn should_quit(key: KeyEvent) -> bool {
    fold_case(key.code) == QUIT_KEY
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Option<GameAction> {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(press(KeyCode::Left), Some(GameAction::MoveLeft));
        assert_eq!(press(KeyCode::Right), Some(GameAction::MoveRight));
        assert_eq!(press(KeyCode::Down), Some(GameAction::SoftDrop));

        assert_eq!(press(KeyCode::Char('H')), Some(GameAction::MoveLeft));
        assert_eq!(press(KeyCode::Char('d')), Some(GameAction::MoveRight));
        assert_eq!(press(KeyCode::Char('J')), Some(GameAction::SoftDrop));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(press(KeyCode::Up), Some(GameAction::RotateCw));
        assert_eq!(press(KeyCode::Char('W')), Some(GameAction::RotateCw));
        assert_eq!(press(KeyCode::Char('z')), Some(GameAction::RotateCcw));
        assert_eq!(press(KeyCode::Char('Y')), Some(GameAction::RotateCcw));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(press(KeyCode::Char(' ')), Some(GameAction::HardDrop));
        assert_eq!(press(KeyCode::Char('p')), Some(GameAction::Pause));
        assert_eq!(press(KeyCode::Char('R')), Some(GameAction::Restart));
        assert_eq!(press(KeyCode::Char('c')), None);
        assert_eq!(press(KeyCode::Char('q')), None);
    }

    #[test]
    fn test_every_action_is_bound_once() {
        for action in [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::SoftDrop,
            GameAction::HardDrop,
            GameAction::RotateCw,
            GameAction::RotateCcw,
            GameAction::Pause,
            GameAction::Restart,
        ] {
            let rows = BINDINGS.iter().filter(|(a, _)| *a == action).count();
            assert_eq!(rows, 1, "{action:?}");
        }

        let keys: Vec<KeyCode> = BINDINGS.iter().flat_map(|(_, k)| k.iter().copied()).collect();
        for (i, key) in keys.iter().enumerate() {
            assert!(!keys[i + 1..].contains(key), "{key:?} bound twice");
            assert_eq!(fold_case(*key), *key, "{key:?} not lowercase");
            assert_ne!(*key, QUIT_KEY);
        }
    }

    #[test]
    fn test_release_and_chords_are_ignored() {
        let release = KeyEvent::new_with_kind(
            KeyCode::Left,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        assert_eq!(handle_key_event(release), None);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('z'), KeyModifiers::CONTROL)),
            None
        );
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('H'), KeyModifiers::SHIFT)),
            Some(GameAction::MoveLeft)
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Char('Q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
