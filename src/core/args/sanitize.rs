// ─── Argument Sanitizer ───
// Redacts credentials from launch tokens before they are surfaced in logs
// or diagnostics.

use super::ACCESS_TOKEN_FLAG;

/// Return a copy of `args`, with the access token pair removed when `redact` is set.
///
/// The canonical argument store is never touched; callers pass the
/// flattened copy.
pub fn sanitize_launch_args(args: &[String], redact: bool) -> Vec<String> {
    if !redact {
        return args.to_vec();
    }

    strip_flag_pairs(args, ACCESS_TOKEN_FLAG)
}

/// Drop every `flag` together with the single token after it.
///
/// A value token equal to `flag` opens a new pair instead of being consumed
/// as a plain value. A trailing `flag` is dropped alone.
pub fn strip_flag_pairs(args: &[String], flag: &str) -> Vec<String> {
    let mut sanitized = Vec::with_capacity(args.len());
    let mut i = 0;

    while i < args.len() {
        if args[i] == flag {
            i += 1;
            if i < args.len() && args[i] != flag {
                i += 1;
            }
            continue;
        }

        sanitized.push(args[i].clone());
        i += 1;
    }

    sanitized
}
