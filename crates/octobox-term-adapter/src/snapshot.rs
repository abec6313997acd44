//! Snapshot helpers for render-frame regression tests.

use crate::render::RenderFrame;

/// Frame text with trailing blanks stripped from every row.
#[must_use]
pub fn trimmed_snapshot(frame: &RenderFrame) -> String {
    frame
        .snapshot()
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Assert a stable text snapshot for a render frame.
///
/// Rows are compared with trailing blanks removed, and a trailing newline in
/// `expected` is ignored. On mismatch the first differing row is reported.
pub fn assert_render_frame_snapshot(label: &str, frame: &RenderFrame, expected: &str) {
    let expected = expected
        .trim_end_matches('\n')
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");
    let got = trimmed_snapshot(frame);
    if got == expected {
        return;
    }
    let first_diff = got
        .lines()
        .zip(expected.lines())
        .position(|(left, right)| left != right)
        .unwrap_or_else(|| got.lines().count().min(expected.lines().count()));
    panic!(
        "render frame snapshot mismatch ({label}) at row {first_diff}\n--- expected\n{expected}\n--- got\n{got}"
    );
}
