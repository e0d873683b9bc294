#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Exclusion filter must not panic on any package/file pair.
    if let Ok(s) = std::str::from_utf8(data) {
        let (package, file) = s.split_once('\n').unwrap_or((s, ""));
        let filter = jacosum::filter::ExclusionFilter::default();
        let _ = filter.is_excluded(package, file);
    }
});
