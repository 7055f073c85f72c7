use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use chessrooms::engine;
use chessrooms::piece::Color;
use chessrooms::{
    Command, CommandOutcome, GameStatus, JoinOutcome, RoomId, RoomRegistry, Seat, Session, SessionId, Square,
};

fn sq(s: &str) -> Square {
    Square::from_notation(s).unwrap()
}

fn click(registry: &RoomRegistry, session: SessionId, room: RoomId, s: &str) -> CommandOutcome {
    let target = sq(s);
    let command = Command { room_id: room, target_file: target.file as i32, target_rank: target.rank as i32 };
    registry.execute(session, command).expect("room exists")
}

fn seated(registry: &RoomRegistry) -> (RoomId, SessionId, SessionId) {
    let room = registry.create_room("alice", 5).unwrap();
    let alice = Session::silent(SessionId(1), "alice");
    let bob = Session::silent(SessionId(2), "bob");
    assert_eq!(registry.join_room(&alice, room).unwrap(), JoinOutcome::Joined(Seat::Host));
    assert_eq!(registry.join_room(&bob, room).unwrap(), JoinOutcome::Joined(Seat::Guest));
    (room, alice.id, bob.id)
}

#[test]
fn third_player_cannot_join_a_full_room() {
    let registry = RoomRegistry::new();
    let (room, _, _) = seated(&registry);
    let carol = Session::silent(SessionId(3), "carol");
    assert!(!registry.join_room(&carol, room).unwrap().joined());
    let info = registry.room_info(room).unwrap();
    assert_eq!((info.host_name.as_str(), info.guest_name.as_str()), ("alice", "bob"));
}

#[test]
fn fools_mate_through_the_room() {
    let registry = RoomRegistry::new();
    let (room, alice, bob) = seated(&registry);
    let plies = [(alice, "f2", "f3"), (bob, "e7", "e5"), (alice, "g2", "g4"), (bob, "d8", "h4")];

    for (i, (who, from, to)) in plies.iter().enumerate() {
        let info = registry.room_info(room).unwrap();
        assert_eq!(info.status, GameStatus::Ongoing, "ongoing before ply {i}");
        let shared = registry.room(room).unwrap();
        let board = shared.lock().unwrap().game().board().clone();
        assert!(!engine::is_checkmate(&board, Color::White));
        assert!(!engine::is_checkmate(&board, Color::Black));

        assert_eq!(click(&registry, *who, room, from), CommandOutcome::Selected(sq(from)));
        let highlighted = registry.room_info(room).unwrap().board.legal_destinations();
        assert!(highlighted.contains(&sq(to)), "{to} highlighted for {from}");
        assert!(matches!(click(&registry, *who, room, to), CommandOutcome::Moved { .. }));
    }

    let info = registry.room_info(room).unwrap();
    assert_eq!(info.status, GameStatus::Checkmate { winner: Color::Black });
    assert!(info.in_check);
    assert!(!info.turn, "white to move and mated");
    assert_eq!(click(&registry, alice, room, "e1"), CommandOutcome::GameOver);
}

#[test]
fn out_of_turn_commands_leave_the_room_untouched() {
    let registry = RoomRegistry::new();
    let (room, alice, bob) = seated(&registry);
    let before = registry.room_info(room).unwrap();

    assert_eq!(click(&registry, bob, room, "e7"), CommandOutcome::WrongTurn);
    assert_eq!(click(&registry, bob, room, "e5"), CommandOutcome::WrongTurn);
    assert_eq!(registry.room_info(room).unwrap(), before);

    click(&registry, alice, room, "e2");
    click(&registry, alice, room, "e4");
    let after = registry.room_info(room).unwrap();
    assert!(after.turn, "exactly one flip");
    assert_eq!(after.board.at(sq("e4")).piece_name, "Pawn_White");
}

#[test]
fn concurrent_rooms_play_independently() {
    let registry = Arc::new(RoomRegistry::new());
    let notifications = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..8u64)
        .map(|n| {
            let registry = Arc::clone(&registry);
            let notifications = Arc::clone(&notifications);
            thread::spawn(move || {
                let host_name = format!("host{n}");
                let room = registry.create_room(&host_name, 3).unwrap();
                let make = |id: u64, name: String| {
                    let counter = Arc::clone(&notifications);
                    Session::new(SessionId(id), name, move |_| {
                        counter.fetch_add(1, Ordering::SeqCst);
                    })
                };
                let host = make(n * 2 + 1, host_name);
                let guest = make(n * 2 + 2, format!("guest{n}"));
                registry.join_room(&host, room).unwrap();
                registry.join_room(&guest, room).unwrap();

                for (who, s) in [(host.id, "d2"), (host.id, "d4"), (guest.id, "d7"), (guest.id, "d5")] {
                    click(&registry, who, room, s);
                }
                room
            })
        })
        .collect();

    let rooms: Vec<RoomId> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(registry.list_rooms().len(), 8);
    for room in rooms {
        let info = registry.room_info(room).unwrap();
        assert!(!info.turn, "two plies played, host to move again");
        assert_eq!(info.board.at(sq("d5")).piece_name, "Pawn_Black");
    }
    // Per room: 1 + 2 for the joins, then 4 accepted commands seen by both seats.
    assert_eq!(notifications.load(Ordering::SeqCst), 8 * (3 + 4 * 2));
}

#[test]
fn disconnect_races_with_commands_without_corrupting_state() {
    let registry = Arc::new(RoomRegistry::new());
    let room = registry.create_room("alice", 5).unwrap();
    let alice_hits = Arc::new(AtomicUsize::new(0));
    let bob_hits = Arc::new(AtomicUsize::new(0));
    let counting = |id: u64, name: &str, hits: &Arc<AtomicUsize>| {
        let hits = Arc::clone(hits);
        Session::new(SessionId(id), name, move |_| {
            hits.fetch_add(1, Ordering::SeqCst);
        })
    };
    let alice = counting(1, "alice", &alice_hits);
    let bob = counting(2, "bob", &bob_hits);
    registry.join_room(&alice, room).unwrap();
    registry.join_room(&bob, room).unwrap();
    click(&registry, alice.id, room, "e2");
    click(&registry, alice.id, room, "e4");
    let bob_before = bob_hits.load(Ordering::SeqCst);

    // Bob keeps picking up pieces while he is being disconnected.
    let worker = {
        let registry = Arc::clone(&registry);
        let bob = bob.id;
        thread::spawn(move || {
            let mut outcomes = Vec::new();
            for _ in 0..50 {
                outcomes.push(click(&registry, bob, room, "b8"));
                outcomes.push(click(&registry, bob, room, "g8"));
            }
            outcomes
        })
    };
    assert_eq!(registry.disconnect(bob.id), vec![room]);
    let outcomes = worker.join().unwrap();

    // Once a command is refused for a missing seat, every later one is too.
    let first_refused = outcomes.iter().position(|o| *o == CommandOutcome::NotSeated).unwrap_or(outcomes.len());
    assert!(outcomes[first_refused..].iter().all(|o| *o == CommandOutcome::NotSeated));
    assert!(outcomes[..first_refused].iter().all(|o| o.changed_state()));
    assert_eq!(
        bob_hits.load(Ordering::SeqCst),
        bob_before + first_refused,
        "bob hears only about his own accepted clicks"
    );

    assert_eq!(click(&registry, bob.id, room, "d7"), CommandOutcome::NotSeated);
    assert_eq!(click(&registry, alice.id, room, "d2"), CommandOutcome::AwaitingOpponent);
    let info = registry.room_info(room).unwrap();
    assert_eq!(info.guest_name, "");
    assert!(info.turn, "still bob's move; nothing he sent moved a piece");
    assert_eq!(info.board.at(sq("b8")).piece_name, "Knight_Left_Black");
}
