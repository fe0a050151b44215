//! Local templated posts for when the model path fails

use autopost_domain::{GenerationRequest, PostPurpose};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::sync::{Mutex, PoisonError};

// Placeholders: {profession} {topic} {reason}
// A template line containing {reason} is dropped when the request has none.

const GENERAL_TEMPLATES: &[&str] = &[
    "As a {profession}, I've been thinking a lot about {topic} lately.\n\
     {reason}\n\
     The biggest lesson so far: small, consistent steps beat occasional big pushes.\n\
     How do you approach {topic} in your work?",
    "A quick thought on {topic} from my desk as a {profession}.\n\
     {reason}\n\
     It rarely looks the way you expect from the outside, and that's what makes it worth sharing.\n\
     Would love to hear your take.",
    "{topic}: one thing every {profession} eventually learns.\n\
     {reason}\n\
     You don't need to have it all figured out. You just need to keep showing up.",
];

const ACHIEVEMENT_TEMPLATES: &[&str] = &[
    "Small win, big smile! As a {profession}, I just reached a milestone in {topic}.\n\
     {reason}\n\
     Grateful to everyone who helped along the way. On to the next one!",
    "Proud moment: a new step forward in {topic}.\n\
     {reason}\n\
     Being a {profession} means learning every single day, and this one felt special.\n\
     Thank you to my mentors and peers.",
    "Celebrating progress today. Months of work as a {profession} on {topic} finally paid off.\n\
     {reason}\n\
     If you're in the middle of your own grind, keep going. It adds up.",
];

const JOB_SEARCH_TEMPLATES: &[&str] = &[
    "I'm looking for my next role as a {profession}.\n\
     {reason}\n\
     I care deeply about {topic} and I'm ready to bring that energy to a new team.\n\
     If you know of an opening, or someone I should talk to, I'd really appreciate a message or a share.",
    "Open to work: {profession}.\n\
     {reason}\n\
     I've spent my time sharpening my skills in {topic}, and I'm excited about what comes next.\n\
     Referrals, advice and introductions are all welcome!",
    "New chapter, same drive. I'm actively searching for {profession} opportunities.\n\
     {reason}\n\
     {topic} is where I do my best work. Let's connect if your team is hiring.",
];

const CAREER_CHANGE_TEMPLATES: &[&str] = &[
    "Time for a change. I'm moving into a new path as a {profession}.\n\
     {reason}\n\
     {topic} is what pulled me in, and I'm all in on learning fast.\n\
     If you've made a similar switch, I'd love to hear how it went.",
    "Career pivot, announced! After a lot of thought I'm stepping into work as a {profession}.\n\
     {reason}\n\
     Everything I learn about {topic} makes me more sure this was the right call.",
    "Not every career follows a straight line, and mine just took a turn toward {topic}.\n\
     {reason}\n\
     Starting fresh as a {profession} is scary and exciting at the same time.",
];

const HIRING_TEMPLATES: &[&str] = &[
    "We're hiring! Our team is looking for a {profession} who is passionate about {topic}.\n\
     {reason}\n\
     If that sounds like you, or someone you know, drop me a message.",
    "Know a great {profession}? We're growing and {topic} is at the heart of what we do.\n\
     {reason}\n\
     Share this with your network, it might be someone's next big move.",
    "Opening alert: {profession}.\n\
     {reason}\n\
     You'll work on {topic} with a team that values curiosity and ownership. DMs are open!",
];

/// Templates available for a purpose
pub fn templates_for(purpose: PostPurpose) -> &'static [&'static str] {
    match purpose {
        PostPurpose::General => GENERAL_TEMPLATES,
        PostPurpose::Achievement => ACHIEVEMENT_TEMPLATES,
        PostPurpose::JobSearch => JOB_SEARCH_TEMPLATES,
        PostPurpose::CareerChange => CAREER_CHANGE_TEMPLATES,
        PostPurpose::Hiring => HIRING_TEMPLATES,
    }
}

/// Assembles a post from hand-authored templates without calling the model
///
/// Output always names the request's profession and topic. Template choice
/// is random; seed it with [`FallbackGenerator::with_seed`] for repeatable
/// output.
pub struct FallbackGenerator {
    rng: Mutex<StdRng>,
}

impl fmt::Debug for FallbackGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackGenerator").finish_non_exhaustive()
    }
}

impl FallbackGenerator {
    /// Create a generator seeded from the OS
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create a generator with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Index of the template to use for `purpose`
    pub fn choose(&self, purpose: PostPurpose) -> usize {
        let count = templates_for(purpose).len();
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .gen_range(0..count)
    }

    /// Build a fallback post for `request`
    pub fn generate(&self, request: &GenerationRequest) -> String {
        let index = self.choose(request.purpose);
        render(templates_for(request.purpose)[index], request)
    }
}

impl Default for FallbackGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Fill a template from a request
pub fn render(template: &str, request: &GenerationRequest) -> String {
    let topic = request.topic.trim();
    let profession = request.profession.trim();
    let reason = request.reason_text();

    let mut lines: Vec<String> = template
        .lines()
        .map(str::trim)
        .filter(|line| reason.is_some() || !line.contains("{reason}"))
        .map(|line| {
            fill(line, |name| match name {
                "profession" => Some(profession),
                "topic" => Some(topic),
                "reason" => Some(reason.unwrap_or_default()),
                _ => None,
            })
        })
        .collect();

    lines.push(String::new());
    lines.push(hashtags(request));
    lines.join("\n")
}

/// Substitute `{name}` placeholders in one pass
///
/// Inserted values are never scanned again. Unknown placeholders are kept
/// as written.
fn fill<'a>(line: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}').and_then(|close| Some((close, lookup(&after[..close])?))) {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Topic and keywords as a hashtag line
fn hashtags(request: &GenerationRequest) -> String {
    let mut tags: Vec<String> = Vec::new();
    for word in std::iter::once(request.topic.as_str()).chain(request.keyword_list()) {
        let tag: String = word.split_whitespace().collect();
        if tag.is_empty() {
            continue;
        }
        let tag = format!("#{}", tag);
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags.join(" ")
}
