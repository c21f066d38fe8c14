//! Tests for capturing real call stacks at the wrapping site
#![cfg(feature = "full-backtrace")]

use errtrace::{
    with_data, with_stack, Error, OptionExt, RenderMode, RenderOptions, ResultExt, StackTrace,
    DEFAULT_NOISE_PREFIXES, MAX_FRAMES,
};
use regex::Regex;
use std::io;

#[inline(never)]
fn open_config() -> Error {
    with_stack(io::Error::new(io::ErrorKind::NotFound, "file not found"))
}

#[inline(never)]
fn open_config_via_method() -> Error {
    Error::with_stack(io::Error::new(io::ErrorKind::NotFound, "file not found"))
}

#[inline(never)]
fn read_settings() -> errtrace::Result<u32> {
    let raw: Result<u32, io::Error> = Err(io::Error::new(io::ErrorKind::Other, "unreadable"));
    raw.stack()
}

#[inline(never)]
fn lookup_user(id: u32) -> errtrace::Result<&'static str> {
    None::<&'static str>.ok_or_stack(format!("no user {id}"))
}

#[inline(never)]
fn check_quota(used: u32) -> errtrace::Result<()> {
    errtrace::ensure!(used < 10, "quota exceeded");
    Ok(())
}

#[inline(never)]
fn refuse() -> errtrace::Result<()> {
    errtrace::bail!("refused");
}

fn frame_functions(err: &Error) -> Vec<String> {
    err.trace()
        .map(|trace| {
            trace
                .frames()
                .map(|frame| frame.function_name().to_string())
                .collect()
        })
        .unwrap_or_default()
}

fn mentions(err: &Error, name: &str) -> bool {
    frame_functions(err).iter().any(|function| function.contains(name))
}

#[test]
fn test_with_stack_records_the_calling_function() {
    let err = open_config();

    let trace = err.trace().expect("stack path always records a trace");
    assert!(!trace.is_empty());
    assert!(trace.len() <= MAX_FRAMES);
    assert!(mentions(&err, "open_config"));
}

#[test]
fn test_method_constructor_records_the_calling_function() {
    let err = open_config_via_method();
    assert!(mentions(&err, "open_config_via_method"));
}

#[test]
fn test_caller_precedes_its_own_caller() {
    let err = open_config();
    let functions = frame_functions(&err);

    let callee = functions
        .iter()
        .position(|function| function.contains("open_config"))
        .expect("wrapping site is recorded");
    let caller = functions
        .iter()
        .position(|function| function.contains("test_caller_precedes_its_own_caller"))
        .expect("test function is recorded");
    assert!(callee < caller);
}

#[test]
fn test_detail_rendering_frame_lines() {
    let err = open_config();
    let rendered = err.render(RenderMode::Full, true);
    let line_shape = Regex::new(r"^ {20}\S.* \((\S*)/(\S+):(\d+)\)$").expect("valid regex");

    let mut lines = rendered.lines();
    let first = lines.next().expect("timestamp line");
    assert!(first.ends_with(" file not found"));

    let frames: Vec<&str> = lines.collect();
    assert!(!frames.is_empty());
    for line in &frames {
        assert!(line_shape.is_match(line), "unexpected frame line: {line:?}");

        let function = line.trim_start();
        for prefix in DEFAULT_NOISE_PREFIXES {
            assert!(!function.starts_with(*prefix), "noise frame rendered: {line:?}");
        }
    }
    assert!(frames.iter().any(|line| line.contains("open_config")));
    assert!(frames
        .iter()
        .any(|line| line.contains("(tests/stack_capture_test.rs:")));
}

#[test]
fn test_data_path_renders_no_frames() {
    let err = with_data(io::Error::new(io::ErrorKind::NotFound, "file not found"), 3_u8);
    let rendered = err.render(RenderMode::Full, true);
    assert_eq!(rendered.lines().count(), 1);
}

#[test]
fn test_raw_pointers_are_kept() {
    let trace = StackTrace::capture(0);
    assert_eq!(trace.ips().len(), trace.len());
    assert!(trace.ips().iter().all(|&ip| ip != 0));
}

#[test]
fn test_result_stack_records_caller() {
    let err = read_settings().unwrap_err();
    assert_eq!(err.to_string(), "unreadable");
    assert!(mentions(&err, "read_settings"));
}

#[test]
fn test_option_stack_records_caller() {
    let err = lookup_user(7).unwrap_err();
    assert_eq!(err.to_string(), "no user 7");
    assert!(mentions(&err, "lookup_user"));
}

#[test]
fn test_macros_record_call_site() {
    assert!(check_quota(3).is_ok());

    let err = check_quota(12).unwrap_err();
    assert_eq!(err.to_string(), "quota exceeded");
    assert!(mentions(&err, "check_quota"));

    let err = refuse().unwrap_err();
    assert_eq!(err.to_string(), "refused");
    assert!(mentions(&err, "refuse"));
}

#[test]
fn test_capture_from_another_thread() {
    let err = std::thread::spawn(open_config)
        .join()
        .expect("capturing thread panicked");

    let options = RenderOptions::default();
    let rendered = err.render_with(RenderMode::Full, true, &options, &errtrace::SystemClock);
    assert!(rendered.contains("open_config"));

    for line in rendered.lines().skip(1) {
        let function = line.trim_start();
        for runtime in ["std::", "<std::", "core::", "<core::", "alloc::", "<alloc::", "??"] {
            assert!(!function.starts_with(runtime), "runtime frame rendered: {line:?}");
        }
    }
}
