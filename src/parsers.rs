#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

peg::parser! {
    /// Grammars for the payloads of tagged control lines captured from
    /// the execution sandbox.
    pub grammar parser() for str {
        /// matches any number of spaces and tabs
        rule whitespace() = quiet!{[' ' | '\t']+}

        /// matches a run of decimal digits
        rule number() -> i64
            = n:$(['0'..='9']+) {? n.parse().or(Err("i64")) }

        /// matches the canonical 36-character textual form of a uuid
        rule uuid() -> String
            = u:$(['0'..='9' | 'a'..='f' | 'A'..='F' | '-']*<36>) { u.to_string() }

        /// matches a boolean verdict
        rule verdict() -> bool
            = "true" { true }
            / "false" { false }

        /// parses the payload of a `time` control line into the
        /// elapsed millisecond count
        pub rule timing_payload() -> i64
            = whitespace()? n:number() whitespace()? { n }

        /// parses the payload of an `answ` control line into the
        /// test-case identifier and its boolean verdict
        pub rule answer_payload() -> (String, bool)
            = whitespace()? "tc_id:" id:uuid() whitespace()? v:verdict() whitespace()? { (id, v) }
    }
}
