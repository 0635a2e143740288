#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Fixed prefix of every injected control marker.
pub const CONTROL_PREFIX: &str = "ctr-";

/// Kind discriminator for test-result control lines.
pub const ANSWER_KIND: &str = "answ";

/// Kind discriminator for timing control lines.
pub const TIME_KIND: &str = "time";

/// Literal flag preceding the test-case identifier in answer payloads.
pub const TEST_ID_FLAG: &str = "tc_id:";

/// Canonical textual length of a hyphenated v4 UUID.
pub const UUID_TEXT_LEN: usize = 36;

/// Identifier of the designated program entry method.
pub const ENTRY_METHOD_NAME: &str = "main";

/// Baseline entry method synthesized into submissions that lack one.
pub const BASELINE_ENTRY_METHOD: &str = "public static void main(String[] args){}";

/// Placeholder in test-case arrange code replaced by the entry class
/// name at injection time.
pub const ENTRYPOINT_CLASS_PLACEHOLDER: &str = "${ENTRYPOINT_CLASS_NAME}";

/// Import line required by the injected JSON normalizer.
pub const GSON_IMPORT: &str = "import com.google.gson.Gson;\n";

/// Name of the injected normalizer helper class. Suffixed so user code
/// cannot collide with it.
pub const NORMALIZER_CLASS_NAME: &str = "Normalizer3f1c9d2ab8c44b7e9e01d7f5a6c2e4d9";

/// Source of the injected normalizer helper class.
///
/// Scalars go through `toString`, arrays and collections are normalized
/// element-wise (sorted when order does not matter), and everything else
/// is serialized to JSON, so expected and actual values compare by
/// structural equality rather than reference identity.
pub const NORMALIZER_CLASS: &str = r#"
final class Normalizer3f1c9d2ab8c44b7e9e01d7f5a6c2e4d9 {
    public static Comparable<?> normalize(Object obj, boolean orderMatters) {
        if (obj == null) return null;

        if (obj instanceof Number || obj instanceof String || obj instanceof Boolean) {
            return obj.toString();
        }

        if (obj.getClass().isArray()) {
            java.util.List<String> normalized = new java.util.ArrayList<>();
            int len = java.lang.reflect.Array.getLength(obj);
            for (int i = 0; i < len; i++) {
                normalized.add(normalize(java.lang.reflect.Array.get(obj, i), orderMatters).toString());
            }
            if (!orderMatters) {
                java.util.Collections.sort(normalized);
            }
            return normalized.toString();
        }

        if (obj instanceof java.util.Collection<?> coll) {
            java.util.List<String> normalized = new java.util.ArrayList<>();
            for (Object e : coll) {
                normalized.add(normalize(e, orderMatters).toString());
            }
            if (!orderMatters) {
                java.util.Collections.sort(normalized);
            }
            return normalized.toString();
        }

        return new com.google.gson.Gson().toJson(obj);
    }
}
"#;

/// Maximum recursion depth while parsing nested declarations.
pub const MAX_RECURSION_DEPTH: usize = 100;

/// Budget of parse operations before an input is rejected as
/// pathological.
pub const MAX_PARSE_OPERATIONS: usize = 100_000;

/// Maximum array dimensions accepted on one type reference.
pub const MAX_ARRAY_DIMENSIONS: usize = 255;

/// Maximum tokens of lookahead while classifying one type member.
pub const MAX_MEMBER_LOOKAHEAD: usize = 10_000;

/// Type names pre-seeded into the global scope of every symbol table.
pub const BUILTIN_TYPES: &[&str] = &[
    "byte", "short", "int", "long", "float", "double", "char", "boolean", "String", "Object",
    "void",
];
