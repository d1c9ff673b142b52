use std::io;
use std::sync::{Arc, Mutex};

use marksweep::{Context, GcConfig};
use tracing::Level;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("capture lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Capture {
    fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().expect("capture lock").clone();
        String::from_utf8(bytes)
            .expect("utf-8 log output")
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

#[test]
fn every_cycle_emits_one_info_record() {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(Level::INFO)
        .with_ansi(false)
        .without_time()
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let mut ctx = Context::with_config(GcConfig {
            initial_threshold: 2,
            ..GcConfig::default()
        })
        .expect("valid config");

        ctx.push_int(1).expect("push 1");
        ctx.push_int(2).expect("push 2");
        ctx.push_int(3).expect("push 3 triggers a cycle");
        ctx.collect();
        ctx.destroy();
    });

    let lines = capture.lines();
    let cycles: Vec<&String> = lines.iter().filter(|line| line.contains("collected")).collect();
    assert_eq!(cycles.len(), 3, "log output: {lines:#?}");

    let expected = [
        ("collected 0 objects, 2 remaining", "reclaimed=0", "remaining=2"),
        ("collected 0 objects, 3 remaining", "reclaimed=0", "remaining=3"),
        ("collected 3 objects, 0 remaining", "reclaimed=3", "remaining=0"),
    ];
    for (line, (message, reclaimed, remaining)) in cycles.iter().zip(expected) {
        assert!(line.contains("INFO"), "{line}");
        assert!(line.contains("marksweep::gc"), "{line}");
        assert!(line.contains(message), "{line}");
        assert!(line.contains(reclaimed), "{line}");
        assert!(line.contains(remaining), "{line}");
    }
    assert!(!lines.iter().any(|line| line.contains("DEBUG")));
}
