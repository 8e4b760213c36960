//! Arm Subsystem State Machine
//!
//! This example drives an arm whose target angle is set by edges and whose
//! upper position is gated on a wrist reading.
//!
//! Key concepts:
//! - Edges set actuator targets when a state is entered
//! - Guards read other subsystems before allowing a change
//! - The machine is driven once per control-loop tick
//!
//! Run with: cargo run --example robot_modes

use modeshift::builder::StateMachineBuilder;
use modeshift::state_enum;
use modeshift::{Edge, Guard, Transition, TransitionPattern};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

state_enum! {
    enum ArmState {
        Up,
        Level,
        Down,
    }
}

fn set_target(target: &Arc<Mutex<f64>>, degrees: f64) -> Edge<ArmState> {
    let target = Arc::clone(target);
    Edge::infallible(move |t: &Transition<ArmState>| {
        *target.lock().unwrap() = degrees;
        println!("  edge: {t} sets arm target to {degrees} degrees");
    })
}

fn main() {
    println!("=== Arm Subsystem State Machine ===\n");

    let target_degrees = Arc::new(Mutex::new(0.0));
    let wrist_horizontal = Arc::new(AtomicBool::new(false));
    let wrist = Arc::clone(&wrist_horizontal);

    let mut arm = StateMachineBuilder::new()
        .initial(ArmState::Level)
        .name("arm")
        .edge(
            TransitionPattern::entering(ArmState::Up),
            set_target(&target_degrees, 60.0),
        )
        .edge(
            TransitionPattern::entering(ArmState::Level),
            set_target(&target_degrees, 0.0),
        )
        .edge(
            TransitionPattern::entering(ArmState::Down),
            set_target(&target_degrees, -30.0),
        )
        .guard(
            TransitionPattern::entering(ArmState::Up),
            Guard::named("wrist must be horizontal", move |_| {
                wrist.load(Ordering::SeqCst)
            }),
        )
        .build()
        .unwrap();

    let requests = [
        ArmState::Down,
        ArmState::Up,
        ArmState::Up,
        ArmState::Level,
        ArmState::Level,
    ];

    for (tick, request) in requests.into_iter().enumerate() {
        if tick == 2 {
            println!("  (wrist rotated horizontal)");
            wrist_horizontal.store(true, Ordering::SeqCst);
        }

        let changed = arm.try_change(request).unwrap();
        println!(
            "tick {tick}: request {:?} -> changed: {changed}, state: {:?}, target: {} degrees",
            request,
            arm.current_state(),
            target_degrees.lock().unwrap()
        );
    }

    println!("\n=== Example Complete ===");
}
