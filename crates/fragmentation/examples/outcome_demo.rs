//! Collision-outcome demonstration
//!
//! Drives the resolver through the main outcome regimes: a slow merger, a
//! super-catastrophic disruption, and a grazing encounter, then prints the
//! resulting bodies and the collision report lines.
//!
//! Run with: cargo run --package fragmentation --example outcome_demo

use bodies::{radius_from_mass, BodyId, ParticleSet, ParticleStore};
use fragmentation::{
    CollisionEvent, Disposition, HardSphere, MemoryRecorder, Resolver, ResolverConfig,
};
use nalgebra::{Point3, Vector3};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

/// Builds a colliding pair: heavy target at rest, projectile arriving with
/// the given perpendicular offset and speed.
fn encounter(
    set: &mut ParticleSet,
    m_target: f64,
    m_projectile: f64,
    offset: f64,
    speed: f64,
    rng: &mut ChaChaRng,
) -> CollisionEvent {
    let r_t = radius_from_mass(m_target, 1.0);
    let r_p = radius_from_mass(m_projectile, 1.0);

    // Scatter pairs across the plane so encounters stay independent
    let cx = rng.random::<f64>() * 1e3;
    let cy = rng.random::<f64>() * 1e3;

    let b0 = offset * r_t;
    let xrel = 0.8 * (r_t + r_p);
    let dxx = (xrel.powi(2) - b0.powi(2)).sqrt();

    let first = set.add_body(
        m_target,
        r_t,
        Point3::new(cx, cy, 0.0),
        Vector3::zeros(),
    );
    let second = set.add_body(
        m_projectile,
        r_p,
        Point3::new(cx - dxx, cy - b0, 0.0),
        Vector3::new(speed, 0.0, 0.0),
    );
    CollisionEvent { first, second }
}

fn main() {
    env_logger::init();

    println!("Collision outcome demo\n");
    println!("{}", "=".repeat(60));

    let mut set = ParticleSet::new(1.0);
    let mut rng = ChaChaRng::seed_from_u64(42);
    let mut resolver = Resolver::new(ResolverConfig::cgs(0.1), 1_000_000)
        .expect("valid configuration");
    let mut recorder = MemoryRecorder::default();
    let bounce = HardSphere::bridges();

    let scenarios = [
        ("slow contact", 2.0, 1.0, 0.0, 1e-3),
        ("head-on disruption", 100.0, 1.0, 0.0, 600.0),
        ("grazing encounter", 1.0, 1.0, 1.05, 6.0),
    ];

    for (step, &(label, m_t, m_p, offset, speed)) in scenarios.iter().enumerate() {
        set.time = step as f64;
        let event = encounter(&mut set, m_t, m_p, offset, speed, &mut rng);

        println!("\n[{label}]");
        println!(
            "  target {:?} ({m_t} mass units), projectile {:?} ({m_p}), speed {speed}",
            event.first, event.second
        );

        let disposition = resolver
            .resolve(&mut set, event, &bounce, &mut recorder)
            .expect("well-posed encounter");

        let record = recorder.records.last().expect("record per collision");
        println!(
            "  outcome: {} (code {}), {} new bodies",
            record.outcome.label(),
            record.outcome.report_code(),
            record.fragments.len()
        );

        match disposition {
            Disposition::KeepBoth => println!("  both bodies kept"),
            Disposition::DiscardFirst => {
                let removed = set.remove_body(event.first);
                println!("  discarded first slot: {:?}", removed.map(|b| b.id));
            }
            Disposition::DiscardSecond => {
                let removed = set.remove_body(event.second);
                println!("  discarded second slot: {:?}", removed.map(|b| b.id));
            }
        }

        println!(
            "  bodies in store: {}, total mass: {:.4}",
            set.len(),
            set.total_mass()
        );
    }

    println!("\n{}", "=".repeat(60));
    println!("Collision report:");
    for record in &recorder.records {
        let fragment_summary: Vec<String> = record
            .fragments
            .iter()
            .take(4)
            .map(|(BodyId(id), mass)| format!("{id}:{mass:.3}"))
            .collect();
        println!(
            "  t={:.1} code={} target={} ({:.4}) projectile={} fragments=[{}{}]",
            record.time,
            record.outcome.report_code(),
            record.target.0,
            record.target_mass,
            record.projectile.0,
            fragment_summary.join(", "),
            if record.fragments.len() > 4 { ", …" } else { "" },
        );
    }
    println!("\nNext fragment id: {}", resolver.next_fragment_id());
}
