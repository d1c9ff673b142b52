use marksweep::script::Outcome;
use marksweep::{ObjRef, Object};
use owo_colors::OwoColorize;

pub fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Allocated(obj, object)
        | Outcome::Shown(obj, object)
        | Outcome::Updated(obj, object) => print_binding(*obj, object),
        Outcome::Popped(obj) => println!("{} {}", "popped".bright_black(), obj.cyan()),
        Outcome::Rooted(obj) => println!("{} {}", "rooted".bright_black(), obj.cyan()),
        Outcome::Collected(stats) => println!(
            "{} {}",
            "next collection at".bright_black(),
            stats.threshold.yellow()
        ),
        Outcome::Stats(snapshot) => println!(
            "{} {}  {} {}  {} {}  {} {}",
            "live".bright_black(),
            snapshot.live,
            "threshold".bright_black(),
            snapshot.threshold,
            "roots".bright_black(),
            snapshot.roots,
            "cycles".bright_black(),
            snapshot.collections
        ),
        Outcome::Roots(roots) => {
            let listed = roots
                .iter()
                .map(|obj| obj.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            println!("[{}]", listed.cyan());
        }
    }
}

fn print_binding(obj: ObjRef, object: &Object) {
    println!(
        "{} {} {}",
        obj.cyan().bold(),
        "=".bright_black(),
        object.to_string().bright_white()
    );
}
