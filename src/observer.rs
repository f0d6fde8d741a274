//! Read-only hooks into a running clustering.
//!
//! The convergence loop hands a [`Snapshot`] to an [`IterationObserver`] once
//! before the first assignment and once after every iteration. Observers can
//! log, plot or persist the state; nothing they do feeds back into the run.

use crate::point::Point;
use serde::Serialize;
use std::io::{self, Write};

/// Borrowed view of the run state at one point in time
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    /// 0 for the initial state, then 1, 2, ... after each iteration
    pub iteration: usize,
    /// Whether the assignment step of this iteration changed any owner.
    /// Always `false` for the initial state.
    pub changed: bool,
    pub points: &'a [Point],
    pub centroids: &'a [Point],
    pub owners: &'a [usize],
}

/// Receives the run state as the convergence loop progresses
pub trait IterationObserver {
    /// Called once with the seeded centroids before the first iteration.
    fn on_start(&mut self, _snapshot: &Snapshot<'_>) {}

    /// Called after the update step of every iteration.
    fn on_iteration(&mut self, snapshot: &Snapshot<'_>);
}

impl<F> IterationObserver for F
where
    F: FnMut(&Snapshot<'_>),
{
    fn on_iteration(&mut self, snapshot: &Snapshot<'_>) {
        self(snapshot)
    }
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl IterationObserver for NoopObserver {
    fn on_iteration(&mut self, _snapshot: &Snapshot<'_>) {}
}

/// Writes every snapshot as one JSON object per line.
///
/// Write failures cannot interrupt the run; the first one is kept and later
/// snapshots are skipped. Check [`JsonLinesWriter::finish`] afterwards.
pub struct JsonLinesWriter<W: Write> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: Write> JsonLinesWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    fn write_snapshot(&mut self, snapshot: &Snapshot<'_>) {
        if self.error.is_some() {
            return;
        }

        let result = serde_json::to_writer(&mut self.writer, snapshot)
            .map_err(io::Error::from)
            .and_then(|()| self.writer.write_all(b"\n"));

        if let Err(e) = result {
            log::warn!("Dropping snapshots after write failure: {}", e);
            self.error = Some(e);
        }
    }

    /// Flush and return the inner writer, or the first write error.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> IterationObserver for JsonLinesWriter<W> {
    fn on_start(&mut self, snapshot: &Snapshot<'_>) {
        self.write_snapshot(snapshot);
    }

    fn on_iteration(&mut self, snapshot: &Snapshot<'_>) {
        self.write_snapshot(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot<'a>(
        points: &'a [Point],
        centroids: &'a [Point],
        owners: &'a [usize],
    ) -> Snapshot<'a> {
        Snapshot {
            iteration: 3,
            changed: true,
            points,
            centroids,
            owners,
        }
    }

    #[test]
    fn test_closure_observer() {
        let points = [Point::new(1.0, 2.0)];
        let centroids = [Point::new(1.0, 2.0)];
        let owners = [0];

        let mut seen = Vec::new();
        let mut observer = |s: &Snapshot<'_>| seen.push(s.iteration);
        observer.on_start(&sample_snapshot(&points, &centroids, &owners));
        observer.on_iteration(&sample_snapshot(&points, &centroids, &owners));

        // Closures only hear about iterations
        assert_eq!(seen, vec![3]);
    }

    #[test]
    fn test_json_lines_writer() {
        let points = [Point::new(1.0, 2.0), Point::new(3.0, 4.0)];
        let centroids = [Point::new(2.0, 3.0)];
        let owners = [0, 0];

        let mut writer = JsonLinesWriter::new(Vec::new());
        writer.on_start(&sample_snapshot(&points, &centroids, &owners));
        writer.on_iteration(&sample_snapshot(&points, &centroids, &owners));
        let bytes = writer.finish().unwrap();

        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let value: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(value["iteration"], 3);
        assert_eq!(value["changed"], true);
        assert_eq!(value["centroids"][0]["x"], 2.0);
        assert_eq!(value["owners"].as_array().unwrap().len(), 2);
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_json_lines_writer_keeps_first_error() {
        let points = [Point::new(1.0, 2.0)];
        let owners = [0];

        let mut writer = JsonLinesWriter::new(FailingWriter);
        writer.on_iteration(&sample_snapshot(&points, &points, &owners));
        writer.on_iteration(&sample_snapshot(&points, &points, &owners));

        let err = writer.finish().err().unwrap();
        assert_eq!(err.to_string(), "disk full");
    }
}
