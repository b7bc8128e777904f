use std::fmt;

use anyhow::Result;
use texting_robots::Robot;

/// Well-known name of the directives resource under an origin.
pub const ROBOTS_TXT_FILE: &str = "robots.txt";

/// Substitute content when an origin answers 4xx for its robots.txt.
///
/// Per RFC 9309 an unavailable robots.txt must not be read as a blanket
/// denial.
pub const ALLOW_ALL_ROBOTS_TXT: &str = "User-agent: *\nAllow: /\n";

/// Parsed robots.txt rules for one origin.
///
/// `texting_robots` compiles rules for a single agent at parse time, so the
/// raw body is kept alongside the compiled [`Robot`]: lookups for the agent
/// the rules were fetched with hit the compiled form, any other agent is
/// re-evaluated from the body without another fetch.
pub struct RuleSet {
    agent: String,
    robot: Robot,
    body: String,
}

impl RuleSet {
    pub fn parse(agent: &str, body: String) -> Result<Self> {
        let robot = Robot::new(agent, body.as_bytes())?;
        Ok(Self {
            agent: agent.to_string(),
            robot,
            body,
        })
    }

    /// Rules that permit every path, used when the origin has no robots.txt.
    pub fn allow_all(agent: &str) -> Self {
        Self::parse(agent, ALLOW_ALL_ROBOTS_TXT.to_string())
            .expect("static allow-all rules always parse")
    }

    /// Whether `url` may be requested by `agent`.
    ///
    /// An indeterminate evaluation defaults to allow: no matching rule means
    /// no restriction.
    pub fn allowed(&self, url: &str, agent: &str) -> bool {
        if agent == self.agent {
            return self.robot.allowed(url);
        }
        match Robot::new(agent, self.body.as_bytes()) {
            Ok(robot) => robot.allowed(url),
            Err(e) => {
                log::debug!("indeterminate rule evaluation for agent {agent}: {e}");
                true
            }
        }
    }

    /// Declared `Crawl-delay` in seconds for `agent`, if any.
    pub fn delay(&self, agent: &str) -> Option<f32> {
        if agent == self.agent {
            return self.robot.delay;
        }
        Robot::new(agent, self.body.as_bytes())
            .ok()
            .and_then(|robot| robot.delay)
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("agent", &self.agent)
            .field("body_bytes", &self.body.len())
            .finish()
    }
}
