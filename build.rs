use std::cmp::Ordering;
use std::env;
use std::process::Command;

// Vector units the build host may report; the widest becomes `platform::BUILD_ISA`
#[derive(PartialEq, Eq, Debug)]
struct CpuFeature {
    /// Token searched for in the host's feature listing.
    name: &'static str,
    /// Alternative token (aarch64 Linux reports NEON as `asimd`).
    alias: Option<&'static str>,
    cfg_flag: &'static str,
    register_bytes: usize,
    detected: bool,
}

impl CpuFeature {
    // Wider registers win (lowest number == highest priority)
    fn priority(&self) -> usize {
        match self.name {
            "avx512f" => 0,
            "avx2" => 1,
            "sse4_1" => 2,
            "neon" => 3,
            _ => usize::MAX,
        }
    }

    fn features() -> Vec<CpuFeature> {
        vec![
            CpuFeature {
                name: "sse4_1",
                alias: None,
                cfg_flag: "sse",
                register_bytes: 16,
                detected: false,
            },
            CpuFeature {
                name: "avx2",
                alias: None,
                cfg_flag: "avx2",
                register_bytes: 32,
                detected: false,
            },
            CpuFeature {
                name: "avx512f",
                alias: None,
                cfg_flag: "avx512",
                register_bytes: 64,
                detected: false,
            },
            CpuFeature {
                name: "neon",
                alias: Some("asimd"),
                cfg_flag: "neon",
                register_bytes: 16,
                detected: false,
            },
        ]
    }
}

impl Ord for CpuFeature {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl PartialOrd for CpuFeature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

trait CpuFeatureDetector {
    fn detect_features(&self, features: &mut [CpuFeature]);
    fn is_applicable(&self) -> bool;
}

struct LinuxDetector;
impl CpuFeatureDetector for LinuxDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        if let Ok(cpuinfo) = std::fs::read_to_string("/proc/cpuinfo") {
            let contents = cpuinfo.to_lowercase();
            for feature in features.iter_mut() {
                feature.detected = contents.contains(feature.name)
                    || feature.alias.is_some_and(|alias| contents.contains(alias));
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "linux")
    }
}

struct MacOSDetector;
impl CpuFeatureDetector for MacOSDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        let output = Command::new("sysctl").args(["-a"]).output();

        if let Ok(output) = output {
            let contents = String::from_utf8_lossy(&output.stdout).to_lowercase();

            for feature in features.iter_mut() {
                feature.detected = match feature.name {
                    "avx512f" => contents.contains("hw.optional.avx512f: 1"),
                    "avx2" => contents.contains("hw.optional.avx2_0: 1"),
                    "sse4_1" => contents.contains("hw.optional.sse4_1: 1"),
                    "neon" => contents.contains("hw.optional.neon: 1"),
                    _ => false,
                };
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "macos")
    }
}

struct PlatformDetector;
impl PlatformDetector {
    fn cpu_features_detectors() -> Vec<Box<dyn CpuFeatureDetector>> {
        vec![Box::new(LinuxDetector), Box::new(MacOSDetector)]
    }

    fn detect_cpu_features(features: &mut [CpuFeature]) {
        for detector in Self::cpu_features_detectors() {
            if detector.is_applicable() {
                detector.detect_features(features);
                break;
            }
        }
    }

    fn apply(features: &mut [CpuFeature]) {
        features.sort();

        // Widest detected unit wins; nothing detected means `fallback`
        let cfg_flag = features
            .iter()
            .find(|cpu_feature| cpu_feature.detected)
            .map(|cpu_feature| {
                println!(
                    "build host vector unit: {} ({} bytes)",
                    cpu_feature.name, cpu_feature.register_bytes
                );
                cpu_feature.cfg_flag
            })
            .unwrap_or("fallback");

        println!("cargo:rustc-cfg={cfg_flag}");

        println!("cargo::rustc-check-cfg=cfg(avx512)");
        println!("cargo::rustc-check-cfg=cfg(avx2)");
        println!("cargo::rustc-check-cfg=cfg(sse)");
        println!("cargo::rustc-check-cfg=cfg(neon)");
        println!("cargo::rustc-check-cfg=cfg(fallback)");
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let mut features = CpuFeature::features();

    // Host detection only says something about the target on native builds
    let host = env::var("HOST").unwrap_or_default();
    let target = env::var("TARGET").unwrap_or_default();

    if host == target {
        PlatformDetector::detect_cpu_features(&mut features);
    }

    PlatformDetector::apply(&mut features);
}
