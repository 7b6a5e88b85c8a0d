// Host-side tests for the impulse engine, easing and per-dot timelines.

use dot_field::config::RetriggerPolicy;
use dot_field::constants::{ELASTIC_AMPLITUDE, ELASTIC_PERIOD, INERTIA_STOP_SPEED, PUSH_VELOCITY_SCALE};
use dot_field::ease::{ElasticOut, Inertia};
use dot_field::impulse::ImpulseEngine;
use dot_field::pointer::PointerTracker;
use dot_field::timeline::{AnimationScheduler, Launch};
use dot_field::{Dot, ImpulseState};
use glam::Vec2;

const RESISTANCE: f32 = 750.0;
const RETURN_SEC: f32 = 1.5;
const STEP: f32 = 1.0 / 60.0;

fn run_for(sched: &mut AnimationScheduler, dots: &mut [Dot], seconds: f32) -> Vec<usize> {
    let mut settled = Vec::new();
    let mut t = 0.0;
    while t < seconds {
        settled.extend(sched.advance(STEP, dots));
        t += STEP;
    }
    settled
}

#[test]
fn elastic_out_endpoints_and_overshoot() {
    let ease = ElasticOut::new(ELASTIC_AMPLITUDE, ELASTIC_PERIOD);
    assert_eq!(ease.apply(0.0), 0.0);
    assert_eq!(ease.apply(1.0), 1.0);
    assert!(ease.apply(1e-4).abs() < 1e-2);
    let peak = (1..100)
        .map(|i| ease.apply(i as f32 / 100.0))
        .fold(f32::MIN, f32::max);
    assert!(peak > 1.0, "elastic curve should overshoot, peak {peak}");
    assert!((ease.apply(0.99) - 1.0).abs() < 1e-2);
}

#[test]
fn inertia_glides_and_stops() {
    let glide = Inertia::new(Vec2::new(150.0, 0.0), RESISTANCE);
    let expected = (150.0 - INERTIA_STOP_SPEED) / RESISTANCE;
    assert!((glide.duration() - expected).abs() < 1e-6);
    assert_eq!(glide.displacement(0.0), Vec2::ZERO);
    let mid = glide.displacement(0.05);
    assert!((mid.x - (7.5 - 0.5 * RESISTANCE * 0.0025)).abs() < 1e-4);
    assert_eq!(mid.y, 0.0);
    // Monotonic and stops at rest
    assert!(glide.displacement(0.1).x > mid.x);
    assert_eq!(glide.displacement(10.0), glide.rest());
    assert!(glide.rest().x > 0.0);
}

#[test]
fn weak_launch_has_no_glide() {
    let glide = Inertia::new(Vec2::new(0.5, 0.0), RESISTANCE);
    assert_eq!(glide.duration(), 0.0);
    assert_eq!(glide.rest(), Vec2::ZERO);
}

#[test]
fn push_vector_points_away_and_follows_motion() {
    let push = ImpulseEngine::push_vector(
        Vec2::new(110.0, 100.0),
        Vec2::new(100.0, 100.0),
        Vec2::new(0.0, 2000.0),
    );
    assert_eq!(push, Vec2::new(10.0, 2000.0 * PUSH_VELOCITY_SCALE));
}

#[test]
fn full_cycle_settles_to_exact_zero() {
    let mut sched = AnimationScheduler::new(RESISTANCE, RETURN_SEC);
    let mut dots = vec![Dot::at(Vec2::new(10.0, 10.0))];
    let launch = sched.launch(0, &mut dots[0], Vec2::new(120.0, -60.0), RetriggerPolicy::Ignore);
    assert_eq!(launch, Launch::Started);
    assert_eq!(dots[0].state, ImpulseState::Pushing);

    sched.advance(0.05, &mut dots);
    assert!(dots[0].offset.x > 0.0 && dots[0].offset.y < 0.0);

    // Glide ends well under a second; then the settle phase
    run_for(&mut sched, &mut dots, 0.3);
    assert_eq!(dots[0].state, ImpulseState::Settling);
    assert!(sched.is_active(0));

    let settled = run_for(&mut sched, &mut dots, RETURN_SEC + 0.1);
    assert_eq!(settled, vec![0]);
    assert_eq!(dots[0].offset, Vec2::ZERO);
    assert_eq!(dots[0].state, ImpulseState::AtRest);
    assert_eq!(sched.active_count(), 0);

    // Free to fire again
    let again = sched.launch(0, &mut dots[0], Vec2::new(50.0, 0.0), RetriggerPolicy::Ignore);
    assert_eq!(again, Launch::Started);
}

#[test]
fn ignore_policy_keeps_a_single_timeline() {
    let mut sched = AnimationScheduler::new(RESISTANCE, RETURN_SEC);
    let mut dots = vec![Dot::at(Vec2::new(10.0, 10.0))];
    sched.launch(0, &mut dots[0], Vec2::new(150.0, 0.0), RetriggerPolicy::Ignore);
    sched.advance(0.05, &mut dots);
    let before = dots[0].offset;

    let second = sched.launch(0, &mut dots[0], Vec2::new(-150.0, 0.0), RetriggerPolicy::Ignore);
    assert_eq!(second, Launch::Ignored);
    assert_eq!(sched.active_count(), 1);

    // Still governed by the first push: keeps moving right
    sched.advance(0.05, &mut dots);
    assert!(dots[0].offset.x > before.x);
}

#[test]
fn ignore_policy_also_blocks_during_settle() {
    let mut sched = AnimationScheduler::new(RESISTANCE, RETURN_SEC);
    let mut dots = vec![Dot::at(Vec2::ZERO)];
    sched.launch(0, &mut dots[0], Vec2::new(150.0, 0.0), RetriggerPolicy::Ignore);
    run_for(&mut sched, &mut dots, 0.5);
    assert_eq!(dots[0].state, ImpulseState::Settling);
    let launch = sched.launch(0, &mut dots[0], Vec2::new(0.0, 150.0), RetriggerPolicy::Ignore);
    assert_eq!(launch, Launch::Ignored);
    assert_eq!(dots[0].state, ImpulseState::Settling);
}

#[test]
fn restart_policy_replaces_the_timeline() {
    let mut sched = AnimationScheduler::new(RESISTANCE, RETURN_SEC);
    let mut dots = vec![Dot::at(Vec2::ZERO)];
    sched.launch(0, &mut dots[0], Vec2::new(150.0, 0.0), RetriggerPolicy::Restart);
    sched.advance(0.1, &mut dots);
    let before = dots[0].offset;
    assert!(before.x > 0.0);

    let launch = sched.launch(0, &mut dots[0], Vec2::new(0.0, 150.0), RetriggerPolicy::Restart);
    assert_eq!(launch, Launch::Restarted);
    assert_eq!(sched.active_count(), 1);
    sched.advance(0.05, &mut dots);
    // New glide starts from where the dot was and heads down
    assert_eq!(dots[0].offset.x, before.x);
    assert!(dots[0].offset.y > 0.0);
}

#[test]
fn queue_policy_runs_the_latest_push_after_settling() {
    let mut sched = AnimationScheduler::new(RESISTANCE, RETURN_SEC);
    let mut dots = vec![Dot::at(Vec2::ZERO)];
    sched.launch(0, &mut dots[0], Vec2::new(150.0, 0.0), RetriggerPolicy::Queue);
    sched.advance(0.05, &mut dots);
    assert_eq!(
        sched.launch(0, &mut dots[0], Vec2::new(0.0, 90.0), RetriggerPolicy::Queue),
        Launch::Queued
    );
    assert_eq!(
        sched.launch(0, &mut dots[0], Vec2::new(0.0, 150.0), RetriggerPolicy::Queue),
        Launch::Queued
    );

    // First cycle ends; the queued push begins instead of resting
    let settled = run_for(&mut sched, &mut dots, 0.25 + RETURN_SEC);
    assert!(settled.is_empty());
    assert!(sched.is_active(0));
    sched.advance(0.05, &mut dots);
    assert!(dots[0].offset.y > 0.0);
    assert_eq!(dots[0].state, ImpulseState::Pushing);

    let settled = run_for(&mut sched, &mut dots, 0.25 + RETURN_SEC);
    assert_eq!(settled, vec![0]);
    assert_eq!(dots[0].offset, Vec2::ZERO);
}

#[test]
fn clear_cancels_everything() {
    let mut sched = AnimationScheduler::new(RESISTANCE, RETURN_SEC);
    let mut dots = vec![Dot::at(Vec2::ZERO), Dot::at(Vec2::new(50.0, 0.0))];
    for i in 0..2 {
        let (dot, push) = (&mut dots[i], Vec2::new(100.0, 100.0));
        sched.launch(i, dot, push, RetriggerPolicy::Ignore);
    }
    sched.advance(0.05, &mut dots);
    sched.clear();
    assert_eq!(sched.active_count(), 0);
    let frozen: Vec<Vec2> = dots.iter().map(|d| d.offset).collect();
    sched.advance(0.5, &mut dots);
    let after: Vec<Vec2> = dots.iter().map(|d| d.offset).collect();
    assert_eq!(frozen, after);
}

#[test]
fn timeline_for_missing_dot_is_dropped() {
    let mut sched = AnimationScheduler::new(RESISTANCE, RETURN_SEC);
    let mut dot = Dot::at(Vec2::ZERO);
    sched.launch(5, &mut dot, Vec2::new(100.0, 0.0), RetriggerPolicy::Ignore);
    let mut fewer = vec![Dot::at(Vec2::ZERO)];
    let settled = sched.advance(STEP, &mut fewer);
    assert!(settled.is_empty());
    assert_eq!(sched.active_count(), 0);
    assert_eq!(fewer[0].offset, Vec2::ZERO);
}

#[test]
fn engine_requires_speed_and_reach() {
    let engine = ImpulseEngine::new(100.0, 150.0, RetriggerPolicy::Ignore);
    let mut sched = AnimationScheduler::new(RESISTANCE, RETURN_SEC);
    let mut dots = vec![Dot::at(Vec2::new(0.0, 0.0)), Dot::at(Vec2::new(400.0, 0.0))];

    // 2px over 50ms is 40px/s
    let mut slow = PointerTracker::new(5000.0);
    slow.sample(Vec2::ZERO, Vec2::ZERO, 0.0);
    slow.sample(Vec2::new(2.0, 0.0), Vec2::ZERO, 50.0);
    assert!(slow.speed() < 100.0);
    assert_eq!(engine.evaluate(&mut dots, &slow, &mut sched), 0);

    // 20px over 50ms is 400px/s
    let mut fast = PointerTracker::new(5000.0);
    fast.sample(Vec2::ZERO, Vec2::ZERO, 0.0);
    fast.sample(Vec2::new(20.0, 0.0), Vec2::ZERO, 50.0);
    assert!(fast.speed() > 100.0);
    assert_eq!(engine.evaluate(&mut dots, &fast, &mut sched), 1);
    assert!(dots[0].impulse_active());
    assert!(!dots[1].impulse_active());

    // Same sample again: the running dot is skipped
    assert_eq!(engine.evaluate(&mut dots, &fast, &mut sched), 0);
    assert_eq!(sched.active_count(), 1);
}

#[test]
fn engine_ignores_absent_pointer() {
    let engine = ImpulseEngine::new(0.0, 1000.0, RetriggerPolicy::Ignore);
    let mut sched = AnimationScheduler::new(RESISTANCE, RETURN_SEC);
    let mut dots = vec![Dot::at(Vec2::ZERO)];
    let mut tracker = PointerTracker::new(5000.0);
    tracker.sample(Vec2::new(100.0, 0.0), Vec2::ZERO, 0.0);
    tracker.leave();
    assert_eq!(engine.evaluate(&mut dots, &tracker, &mut sched), 0);
}

fn fast_pointer_at(x: f32) -> PointerTracker {
    // 20px over 50ms is 400px/s, ending at (x, 0)
    let mut tracker = PointerTracker::new(5000.0);
    tracker.sample(Vec2::new(x - 20.0, 0.0), Vec2::ZERO, 0.0);
    tracker.sample(Vec2::new(x, 0.0), Vec2::ZERO, 50.0);
    tracker
}

#[test]
fn engine_restart_policy_relaunches_running_dots() {
    let engine = ImpulseEngine::new(100.0, 150.0, RetriggerPolicy::Restart);
    let mut sched = AnimationScheduler::new(RESISTANCE, RETURN_SEC);
    let mut dots = vec![Dot::at(Vec2::ZERO)];
    let pointer = fast_pointer_at(20.0);

    assert_eq!(engine.evaluate(&mut dots, &pointer, &mut sched), 1);
    sched.advance(0.01, &mut dots);
    assert!(dots[0].offset.x < 0.0);

    // Running dot is counted again and pushed from where it is
    let before = dots[0].offset;
    assert_eq!(engine.evaluate(&mut dots, &pointer, &mut sched), 1);
    assert_eq!(sched.active_count(), 1);
    assert_eq!(dots[0].state, ImpulseState::Pushing);
    sched.advance(0.005, &mut dots);
    assert!(dots[0].offset.x < before.x);
}

#[test]
fn engine_queue_policy_defers_running_dots() {
    let engine = ImpulseEngine::new(100.0, 150.0, RetriggerPolicy::Queue);
    let mut sched = AnimationScheduler::new(RESISTANCE, RETURN_SEC);
    let mut dots = vec![Dot::at(Vec2::ZERO)];
    let pointer = fast_pointer_at(20.0);

    assert_eq!(engine.evaluate(&mut dots, &pointer, &mut sched), 1);
    // Queued pushes are not counted as launches
    assert_eq!(engine.evaluate(&mut dots, &pointer, &mut sched), 0);
    assert_eq!(sched.active_count(), 1);

    // First cycle completes, the queued push keeps the dot busy
    let settled = run_for(&mut sched, &mut dots, RETURN_SEC + 0.1);
    assert!(settled.is_empty());
    assert!(sched.is_active(0));

    let settled = run_for(&mut sched, &mut dots, RETURN_SEC + 0.1);
    assert_eq!(settled, vec![0]);
    assert_eq!(dots[0].offset, Vec2::ZERO);
    assert_eq!(dots[0].state, ImpulseState::AtRest);
}
