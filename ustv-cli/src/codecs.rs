//! Human readable names for RFC 6381 codec tags.

/// Describe a single codec tag, e.g. `avc1.64001f` -> `H.264 High Profile level 3.1`.
pub fn describe_codec(tag: &str) -> String {
    let tag = tag.trim().to_lowercase();
    known_codec(&tag).unwrap_or_else(|| format!("Unknown Codec ({tag})"))
}

pub fn describe_codecs(codecs: &[String]) -> String {
    codecs
        .iter()
        .map(|c| describe_codec(c))
        .collect::<Vec<_>>()
        .join(", ")
}

fn known_codec(tag: &str) -> Option<String> {
    let (fourcc, rest) = tag.split_once('.').unwrap_or((tag, ""));
    let name = match fourcc {
        "avc1" | "avc3" => return describe_avc(rest),
        "hvc1" | "hev1" => "H.265/HEVC",
        "av01" => "AV1",
        "vp09" => "VP9",
        "vp8" => "VP8",
        "mp4a" => return describe_mp4a(rest),
        "ac-3" => "Dolby Digital (AC-3)",
        "ec-3" => "Dolby Digital Plus (E-AC-3)",
        "ac-4" => "Dolby AC-4",
        "opus" => "Opus",
        "flac" => "FLAC",
        "stpp" => "TTML subtitles",
        "wvtt" => "WebVTT subtitles",
        _ => return None,
    };
    Some(name.to_string())
}

/// `avc1.PPCCLL`: profile_idc, constraint flags and level_idc as hex bytes.
fn describe_avc(params: &str) -> Option<String> {
    if params.len() != 6 {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(params.get(i..i + 2)?, 16).ok();
    let (profile_idc, constraints, level_idc) = (byte(0)?, byte(2)?, byte(4)?);

    let profile = match profile_idc {
        66 if constraints & 0x40 != 0 => "Constrained Baseline",
        66 => "Baseline",
        77 => "Main",
        88 => "Extended",
        100 => "High",
        110 => "High 10",
        122 => "High 4:2:2",
        244 => "High 4:4:4 Predictive",
        _ => return Some(format!("H.264 profile {profile_idc} level {}", level(level_idc))),
    };
    Some(format!("H.264 {profile} Profile level {}", level(level_idc)))
}

fn level(level_idc: u8) -> String {
    format!("{}.{}", level_idc / 10, level_idc % 10)
}

/// `mp4a.OO.A`: MPEG-4 object type and audio object type.
fn describe_mp4a(params: &str) -> Option<String> {
    let name = match params {
        "40.2" => "AAC-LC",
        "40.5" => "HE-AAC",
        "40.29" => "HE-AACv2",
        "40.34" | "69" | "6b" => "MP3",
        "a5" => "Dolby Digital (AC-3)",
        "a6" => "Dolby Digital Plus (E-AC-3)",
        _ if params.starts_with("40.") => "MPEG-4 Audio",
        _ => return None,
    };
    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_avc_profiles() {
        assert_eq!(describe_codec("avc1.64001f"), "H.264 High Profile level 3.1");
        assert_eq!(describe_codec("avc1.42001e"), "H.264 Baseline Profile level 3.0");
        assert_eq!(
            describe_codec("avc1.42e01e"),
            "H.264 Constrained Baseline Profile level 3.0"
        );
        assert_eq!(describe_codec("AVC1.4D401F "), "H.264 Main Profile level 3.1");
    }

    #[test]
    fn audio_codecs() {
        assert_eq!(describe_codec("mp4a.40.2"), "AAC-LC");
        assert_eq!(describe_codec("mp4a.40.5"), "HE-AAC");
        assert_eq!(describe_codec("ec-3"), "Dolby Digital Plus (E-AC-3)");
    }

    #[test]
    fn unknown_codecs_are_named() {
        assert_eq!(describe_codec("xyz1.2"), "Unknown Codec (xyz1.2)");
        assert_eq!(describe_codec("avc1.zz"), "Unknown Codec (avc1.zz)");
    }

    #[test]
    fn joins_lists() {
        let codecs = vec!["avc1.64001f".to_string(), "mp4a.40.2".to_string()];
        assert_eq!(
            describe_codecs(&codecs),
            "H.264 High Profile level 3.1, AAC-LC"
        );
    }
}
