//! End-to-end matches driven through the public `Simulation` API

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use knife_arena::{
    Axis, BallConfig, BallUpdate, ImageHandle, KillNotice, PickupKind, PickupSettings,
    SimEvent, SimSettings, Simulation,
};

/// 300×300 arena at (20, 20), no pickups
fn arena_300(seed: u64) -> Simulation {
    Simulation::new(SimSettings {
        canvas_width: 340.0,
        canvas_height: 340.0,
        pickups: Vec::new(),
        ..SimSettings::seeded(seed)
    })
}

fn big_arena(seed: u64, pickups: Vec<PickupSettings>) -> Simulation {
    Simulation::new(SimSettings {
        pickups,
        ..SimSettings::seeded(seed)
    })
}

#[test]
fn knife_cut_then_kill() {
    let mut sim = big_arena(11, Vec::new());
    let notices: Rc<RefCell<Vec<KillNotice>>> = Rc::default();
    let sink = Rc::clone(&notices);
    sim.set_kill_observer(move |n| sink.borrow_mut().push(n.clone()));

    let a = sim.add_ball(BallConfig::at(100.0, 100.0).with_size(20.0, 2.0).with_knife());
    let b = sim.add_ball(BallConfig::at(130.0, 100.0).with_size(20.0, 2.0));
    let bystander = sim.add_ball(BallConfig::at(600.0, 400.0));

    // First hit
    sim.step();
    let victim = sim.ball(b).expect("b survives the first cut");
    assert_eq!(victim.mass, 1.0);
    assert_eq!(victim.radius, 10.0);
    assert_eq!(victim.last_hit_by, Some(a));
    assert!(!sim.ball(a).unwrap().has_knife);
    assert!(sim.kill_feed().is_empty());

    // Re-arm and bring them together again
    let rearm = |x: f32| BallUpdate {
        x: Some(x),
        y: Some(100.0),
        vx: Some(0.0),
        vy: Some(0.0),
        ..Default::default()
    };
    sim.update_ball(
        a,
        BallUpdate {
            has_knife: Some(true),
            ..rearm(100.0)
        },
    );
    sim.update_ball(b, rearm(125.0));
    sim.step();

    assert!(sim.ball(b).is_none());
    assert_eq!(sim.ball_count(), 2);
    assert!(sim.ball(bystander).is_some());

    let entry = sim.kill_feed().last().expect("kill recorded");
    assert_eq!((entry.killer_id, entry.victim_id), (a, b));
    assert_eq!(sim.kill_feed().len(), 1);

    let notices = notices.borrow();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].remaining, 2);
    assert_eq!(notices[0].killer_color, sim.ball(a).unwrap().color);
}

#[test]
fn killer_removed_first_gets_no_credit() {
    let mut sim = big_arena(12, Vec::new());
    let killer = sim.add_ball(BallConfig::at(100.0, 100.0));
    let victim = sim.add_ball(BallConfig::at(400.0, 300.0));

    sim.update_ball(
        victim,
        BallUpdate {
            radius: Some(0.0),
            last_hit_by: Some(Some(killer)),
            ..Default::default()
        },
    );
    sim.remove_ball(killer);
    sim.step();

    assert_eq!(sim.ball_count(), 0);
    assert!(sim.kill_feed().is_empty());
}

#[test]
fn massless_ball_can_still_be_killed() {
    let mut sim = big_arena(13, Vec::new());
    let a = sim.add_ball(BallConfig::at(100.0, 100.0).with_size(20.0, 2.0).with_knife());
    let b = sim.add_ball(BallConfig::at(140.0, 100.0).with_size(30.0, 1.0));
    sim.add_ball(BallConfig::at(600.0, 400.0));

    sim.step();
    let victim = sim.ball(b).expect("b survives the first cut");
    assert_eq!((victim.mass, victim.radius), (0.0, 20.0));

    for x in [125.0, 115.0] {
        sim.update_ball(
            a,
            BallUpdate {
                x: Some(100.0),
                y: Some(100.0),
                vx: Some(0.0),
                vy: Some(0.0),
                has_knife: Some(true),
                ..Default::default()
            },
        );
        sim.update_ball(
            b,
            BallUpdate {
                x: Some(x),
                y: Some(100.0),
                vx: Some(0.0),
                vy: Some(0.0),
                ..Default::default()
            },
        );
        sim.step();
    }

    assert!(sim.ball(b).is_none());
    assert_eq!(sim.kill_feed().kills_by(a), 1);
}

#[test]
fn shrink_box_by_fifty() {
    let mut sim = arena_300(1);
    assert!(sim.reduce_box_size(Axis::Both, 50.0));
    let arena = sim.arena();
    assert_eq!(arena.size(), Vec2::new(250.0, 250.0));
    assert_eq!(arena.center(), Vec2::new(170.0, 170.0));

    let mut shrinks = 0;
    while sim.reduce_box_size(Axis::Both, 50.0) {
        shrinks += 1;
        assert!(sim.arena().width > 100.0 && sim.arena().height > 100.0);
    }
    assert_eq!(shrinks, 2);
    assert_eq!(sim.arena().size(), Vec2::new(150.0, 150.0));
}

#[test]
fn grow_box_never_exceeds_original() {
    let mut sim = arena_300(2);
    assert!(!sim.increase_box_size(Axis::Both, 10.0));

    assert!(sim.reduce_box_size(Axis::Horizontal, 120.0));
    for _ in 0..20 {
        sim.increase_box_size(Axis::Horizontal, 35.0);
        assert!(sim.arena().width <= 300.0);
        assert!(sim.arena().height <= 300.0);
    }
    // 180 + 3 × 35 = 285; a fourth step would overshoot
    assert_eq!(sim.arena().width, 285.0);
    assert!(sim.increase_box_size(Axis::Horizontal, 15.0));
    assert_eq!(sim.arena().width, 300.0);
}

#[test]
fn balls_bounce_back_in_after_shrink() {
    let mut sim = arena_300(3);
    let id = sim.add_ball(BallConfig::at(30.0, 170.0).with_size(10.0, 1.0));
    assert!(sim.reduce_box_size(Axis::Both, 100.0));

    sim.step();
    let ball = sim.ball(id).unwrap();
    assert!(sim.arena().contains_circle(ball.pos, ball.radius));
}

#[test]
fn knife_pickup_arms_the_first_ball() {
    let mut sim = big_arena(4, vec![PickupSettings::knife().with_image(ImageHandle(1))]);
    let knife = sim.pickup(PickupKind::Knife).unwrap();
    let spot = knife.pos + knife.size / 2.0;

    // Two balls sitting on the knife; the first added wins it
    let first = sim.add_ball(BallConfig::at(spot.x, spot.y).with_size(5.0, 1.0));
    let second = sim.add_ball(BallConfig::at(spot.x, spot.y + 10.5).with_size(5.0, 1.0));
    sim.step();

    assert!(sim.ball(first).unwrap().has_knife);
    assert!(!sim.ball(second).unwrap().has_knife);
    assert!(!sim.pickup(PickupKind::Knife).unwrap().is_available());
    assert!(sim.events().contains(&SimEvent::PickupConsumed {
        kind: PickupKind::Knife,
        ball_id: first,
    }));
}

#[test]
fn heart_heals_up_to_spawn_size() {
    let mut sim = big_arena(5, vec![PickupSettings::heart().with_image(ImageHandle(2))]);
    let heart = sim.pickup(PickupKind::Heart).unwrap();
    let spot = heart.pos + heart.size / 2.0;

    let id = sim.add_ball(BallConfig::at(spot.x, spot.y).with_size(25.0, 3.0));
    sim.update_ball(
        id,
        BallUpdate {
            radius: Some(20.0),
            mass: Some(2.0),
            ..Default::default()
        },
    );
    sim.step();

    let ball = sim.ball(id).unwrap();
    assert_eq!(ball.radius, 25.0);
    assert_eq!(ball.mass, 3.0);
    assert!(!sim.pickup(PickupKind::Heart).unwrap().is_available());
}

#[test]
fn heart_comes_back_after_its_delay() {
    let heart = PickupSettings {
        respawn_ticks: 5,
        ..PickupSettings::heart().with_image(ImageHandle(2))
    };
    let mut sim = big_arena(6, vec![heart]);
    let spot = {
        let h = sim.pickup(PickupKind::Heart).unwrap();
        h.pos + h.size / 2.0
    };
    let id = sim.add_ball(BallConfig::at(spot.x, spot.y));
    sim.step();
    assert!(!sim.pickup(PickupKind::Heart).unwrap().is_available());
    sim.remove_ball(id);

    for _ in 0..4 {
        sim.step();
        assert!(!sim.pickup(PickupKind::Heart).unwrap().is_available());
    }
    sim.step();
    assert!(sim.pickup(PickupKind::Heart).unwrap().is_available());
    assert!(sim.events().contains(&SimEvent::PickupRespawned {
        kind: PickupKind::Heart
    }));
}

#[test]
fn settings_json_drives_the_match() {
    let settings = SimSettings::from_json(
        r##"{
            "seed": 99,
            "palette": ["#111111"],
            "ball": { "radius": 12, "mass": 4 },
            "rules": { "knife_radius_damage": 12 },
            "pickups": []
        }"##,
    )
    .unwrap();
    let mut sim = Simulation::new(settings);
    assert_eq!(sim.seed(), 99);

    let a = sim.add_ball(BallConfig::at(100.0, 100.0).with_knife());
    let b = sim.add_ball(BallConfig::at(120.0, 100.0));
    sim.step();

    // One cut of 12 kills a 12-radius ball outright
    assert!(sim.ball(b).is_none());
    assert_eq!(sim.ball(a).unwrap().color.as_str(), "#111111");
    assert_eq!(sim.kill_feed().leaderboard(), vec![(a, 1)]);
}

#[test]
fn same_seed_same_match() {
    let run = || {
        let mut sim = big_arena(
            77,
            vec![
                PickupSettings::knife().with_image(ImageHandle(1)),
                PickupSettings::heart().with_image(ImageHandle(2)),
            ],
        );
        for i in 0..6 {
            let v = i as f32 - 2.5;
            sim.add_ball(BallConfig::default().with_velocity(v, 3.0 - v));
        }
        sim.start();
        for _ in 0..600 {
            sim.frame();
        }
        sim.list_balls()
            .into_iter()
            .map(|b| (b.id, b.pos, b.radius))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}
