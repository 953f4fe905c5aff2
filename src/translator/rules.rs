// WHY: the jargon table is data, not control flow, so matching stays deterministic
// and each rule can be tested without touching the filesystem

use anyhow::{Context, Result};
use regex_automata::meta::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// What a matched rule contributes to a translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleCategory {
    /// Matched span is replaced by `text` in the plain-English rewrite
    Substitution,
    RedFlag,
    Right,
    ActionItem,
}

/// Subject area a rule belongs to, used to classify the whole document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    Medical,
    Legal,
    Insurance,
    Financial,
    General,
}

impl DocumentKind {
    /// Order used for tie-breaking when two domains match equally often
    pub const DOMAINS: [DocumentKind; 4] = [
        DocumentKind::Medical,
        DocumentKind::Legal,
        DocumentKind::Insurance,
        DocumentKind::Financial,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Medical => "Medical",
            DocumentKind::Legal => "Legal",
            DocumentKind::Insurance => "Insurance",
            DocumentKind::Financial => "Financial",
            DocumentKind::General => "General",
        }
    }
}

/// One entry of the jargon table.
///
/// `pattern` is a regex matched case-insensitively unless it opts out with
/// `(?-i:...)`. For non-substitution rules a `{}` in `text` is filled with the
/// matched source text.
#[derive(Debug, Clone, Copy)]
pub struct JargonRule {
    pub pattern: &'static str,
    pub category: RuleCategory,
    pub text: &'static str,
    pub domain: DocumentKind,
}

const fn rule(
    pattern: &'static str,
    category: RuleCategory,
    text: &'static str,
    domain: DocumentKind,
) -> JargonRule {
    JargonRule { pattern, category, text, domain }
}

use DocumentKind::{Financial, Insurance, Legal, Medical};
use RuleCategory::{ActionItem, RedFlag, Right, Substitution};

/// Built-in rule table. Longer phrases must come before their sub-phrases:
/// matching is leftmost-first, so at a given start position the earlier rule wins.
pub const DEFAULT_RULES: &[JargonRule] = &[
    // Medical substitutions
    rule(r"\bacute myocardial infarction\b", Substitution, "sudden heart attack", Medical),
    rule(r"\bmyocardial infarction\b", Substitution, "heart attack", Medical),
    rule(r"\bcoronary artery occlusion\b", Substitution, "blocked heart artery", Medical),
    rule(r"\bpercutaneous coronary intervention\b", Substitution, "procedure to open a blocked heart artery through a small tube", Medical),
    rule(r"\bdrug-eluting stent\b", Substitution, "medicated mesh tube that keeps the artery open", Medical),
    rule(r"\bstent thrombosis\b", Substitution, "a blood clot forming inside the stent", Medical),
    rule(r"\btransient hypotension\b", Substitution, "a short period of low blood pressure", Medical),
    rule(r"\bhypotension\b", Substitution, "low blood pressure", Medical),
    rule(r"\bhypertension\b", Substitution, "high blood pressure", Medical),
    rule(r"\bvasopressor support\b", Substitution, "medicine to raise blood pressure", Medical),
    rule(r"\bcardioprotection\b", Substitution, "protecting the heart", Medical),
    rule(r"\bsecondary prevention\b", Substitution, "preventing another heart problem", Medical),
    rule(r"\bdyspnea\b", Substitution, "shortness of breath", Medical),
    rule(r"\bdiaphoresis\b", Substitution, "heavy sweating", Medical),
    rule(r"\bemergent\b", Substitution, "emergency", Medical),
    rule(r"\bprognosis\b", Substitution, "expected outcome", Medical),
    rule(r"\bbenign\b", Substitution, "not cancer", Medical),
    rule(r"\bmalignant\b", Substitution, "cancerous", Medical),
    rule(r"\bedema\b", Substitution, "swelling", Medical),
    rule(r"\bhyperlipidemia\b", Substitution, "high cholesterol", Medical),
    rule(r"\bcardiac rehabilitation\b", Substitution, "a supervised heart recovery program", Medical),
    rule(r"\bsmoking cessation\b", Substitution, "quitting smoking", Medical),
    rule(r"(?-i:\bBID\b)", Substitution, "twice a day", Medical),
    rule(r"(?-i:\bTID\b)", Substitution, "three times a day", Medical),
    rule(r"(?-i:\bPRN\b)", Substitution, "only when needed", Medical),
    rule(r"(?-i:\bED\b)", Substitution, "emergency room", Medical),
    // Medical flags and actions
    rule(r"\bcontraindicated with [a-z][a-z-]*", RedFlag, "Unsafe combination: do not take this together with what it names ({})", Medical),
    rule(r"\bcontraindicated\b", RedFlag, "Something in this document should not be used in your situation ({})", Medical),
    rule(r"\bcomplicated by\b", RedFlag, "There was a complication during treatment ({})", Medical),
    rule(r"\bsigns of\b", RedFlag, "Warning signs are listed that you need to watch for ({})", Medical),
    rule(r"\breturn to (?:the )?(?:ED|emergency (?:room|department))\b(?: immediately)?", ActionItem, "Go back to the emergency room right away if symptoms come back ({})", Medical),
    rule(r"\b[a-z]+ appointment in \d+ (?:days?|weeks?|months?)", ActionItem, "Book the follow-up visit ({})", Medical),
    rule(r"\bfollow-up\b", ActionItem, "Keep your follow-up appointments ({})", Medical),
    rule(r"\badvised to monitor\b", ActionItem, "Watch your symptoms as instructed ({})", Medical),
    rule(r"\binformed consent\b", Right, "You have the right to understand a treatment before agreeing to it ({})", Medical),
    rule(r"\bsecond opinion\b", Right, "You can ask another doctor to review your case ({})", Medical),
    rule(r"\bHIPAA\b", Right, "Your medical information is protected by privacy law ({})", Medical),
    // Legal
    rule(r"\bhereinafter\b", Substitution, "from now on called", Legal),
    rule(r"\bnotwithstanding\b", Substitution, "regardless of", Legal),
    rule(r"\bpursuant to\b", Substitution, "under", Legal),
    rule(r"\bherein\b", Substitution, "in this document", Legal),
    rule(r"\bforthwith\b", Substitution, "immediately", Legal),
    rule(r"\bin lieu of\b", Substitution, "instead of", Legal),
    rule(r"\bbinding arbitration\b", RedFlag, "You may be giving up your right to sue in court ({})", Legal),
    rule(r"\bindemnify\b", RedFlag, "You may have to pay for the other side's losses or legal costs ({})", Legal),
    rule(r"\bhold harmless\b", RedFlag, "You agree not to blame the other side for certain harms ({})", Legal),
    rule(r"\bwaive[sd]?\b", RedFlag, "You are giving up a right ({})", Legal),
    rule(r"\bliquidated damages\b", RedFlag, "A fixed penalty is set in advance if you break the agreement ({})", Legal),
    rule(r"\bnon-compete\b", RedFlag, "Limits where you can work afterwards ({})", Legal),
    rule(r"\bright to (?:cancel|terminate|rescind)\b", Right, "You can back out of this agreement ({})", Legal),
    rule(r"\bright to (?:appeal|a hearing|counsel)\b", Right, "You can challenge this decision ({})", Legal),
    rule(r"\bcooling[- ]off period\b", Right, "You have a window to change your mind ({})", Legal),
    rule(r"\bsign and return\b", ActionItem, "Sign the document and send it back ({})", Legal),
    rule(r"\bwithin \d+ (?:calendar |business )?days\b", ActionItem, "Deadline: act {}", Legal),
    // Insurance
    rule(r"\bpre-existing conditions?\b", RedFlag, "Health problems you already had may not be covered ({})", Insurance),
    rule(r"\bexclusions?\b", RedFlag, "Some things are not covered ({})", Insurance),
    rule(r"\bnot covered\b", RedFlag, "Some things are not covered ({})", Insurance),
    rule(r"\bdeductible\b", Substitution, "amount you pay before insurance starts paying", Insurance),
    rule(r"\bco-?insurance\b", Substitution, "your share of the cost after the deductible", Insurance),
    rule(r"\bco-?payment\b", Substitution, "fixed fee you pay for each visit", Insurance),
    rule(r"\bpremium\b", Substitution, "regular price of the policy", Insurance),
    rule(r"\bprior authorization\b", ActionItem, "Get approval from the insurer before treatment ({})", Insurance),
    rule(r"\bfile a claim\b", ActionItem, "Submit a claim to get paid ({})", Insurance),
    rule(r"\bgrace period\b", Right, "You get extra time to pay before losing coverage ({})", Insurance),
    rule(r"\bfree[- ]look period\b", Right, "You can cancel for a full refund shortly after buying ({})", Insurance),
    rule(r"\b(?:file an |right to )?appeal\b", Right, "You can ask for the decision to be reviewed ({})", Insurance),
    // Financial
    rule(r"\bannual percentage rate\b", Substitution, "yearly cost of borrowing", Financial),
    rule(r"(?-i:\bAPR\b)", Substitution, "yearly cost of borrowing", Financial),
    rule(r"\bamortization\b", Substitution, "paying off a loan in scheduled installments", Financial),
    rule(r"\bcollateral\b", Substitution, "property the lender can take if you don't pay", Financial),
    rule(r"\bprincipal\b", Substitution, "amount borrowed", Financial),
    rule(r"\bvariable (?:interest )?rate\b", RedFlag, "Your interest rate can go up ({})", Financial),
    rule(r"\bballoon payment\b", RedFlag, "A large lump sum is due at the end ({})", Financial),
    rule(r"\bprepayment penalty\b", RedFlag, "You pay a fee for paying the loan off early ({})", Financial),
    rule(r"\blate (?:fee|charge)s?\b", RedFlag, "Paying late costs extra ({})", Financial),
    rule(r"\bauto(?:matic(?:ally)?)?[- ]renew(?:s|al|ed)?\b", RedFlag, "This renews on its own unless you cancel ({})", Financial),
    rule(r"\bnon-refundable\b", RedFlag, "You will not get this money back ({})", Financial),
    rule(r"\bright to dispute\b", Right, "You can challenge a charge or error ({})", Financial),
    rule(r"\bdue (?:on|by) (?-i:[A-Z][a-z]+) \d{1,2}\b", ActionItem, "Payment deadline: {}", Financial),
];

/// Rule table compiled into a single multi-pattern matcher.
///
/// Pattern `i` of the compiled regex corresponds to `rules[i]`.
#[derive(Debug)]
pub struct RuleSet {
    rules: &'static [JargonRule],
    regex: Regex,
}

impl RuleSet {
    /// Compile the built-in table
    pub fn builtin() -> Result<Self> {
        Self::compile(DEFAULT_RULES)
    }

    /// Compile an arbitrary static table
    pub fn compile(rules: &'static [JargonRule]) -> Result<Self> {
        info!("Compiling {} jargon rules", rules.len());

        let patterns: Vec<String> = rules
            .iter()
            .map(|rule| format!("(?i){}", rule.pattern))
            .collect();
        let regex = Regex::new_many(&patterns).context("Failed to compile jargon rule table")?;

        debug!("Compiled jargon matcher with {} patterns", regex.pattern_len());
        Ok(Self { rules, regex })
    }

    pub fn rules(&self) -> &'static [JargonRule] {
        self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Non-overlapping matches in order of occurrence
    pub fn scan(&self, text: &str) -> Vec<Detection> {
        self.regex
            .find_iter(text)
            .map(|m| Detection {
                rule: m.pattern().as_usize(),
                start: m.start(),
                end: m.end(),
            })
            .collect()
    }

    pub fn get(&self, detection: &Detection) -> &JargonRule {
        &self.rules[detection.rule]
    }
}

/// A single rule hit, as byte offsets into the scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub rule: usize,
    pub start: usize,
    pub end: usize,
}

/// Fill the `{}` placeholder of an explanation with the matched text
pub fn format_explanation(template: &str, matched: &str) -> String {
    if template.contains("{}") {
        template.replacen("{}", matched, 1)
    } else {
        template.to_string()
    }
}
