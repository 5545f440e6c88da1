//! Built-in civics quizzes so the app is playable without any external config.

use std::collections::BTreeMap;

use crate::domain::{NewQuiz, WordGroup};

/// All built-in quizzes, in the order they are loaded into the store.
pub fn seed_quizzes() -> Vec<NewQuiz> {
  vec![branches_of_government(), rights_and_freedoms(), elections_and_voting()]
}

fn group(words: [&str; 4], explanation: &str) -> WordGroup {
  WordGroup {
    words: words.iter().map(|w| w.to_string()).collect(),
    explanation: explanation.to_string(),
  }
}

fn definitions(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
  pairs.iter().map(|(w, d)| (w.to_string(), d.to_string())).collect()
}

pub fn branches_of_government() -> NewQuiz {
  NewQuiz {
    name: "Branches of Government".into(),
    difficulty: "easy".into(),
    word_groups: vec![
      group(
        ["President", "Vice President", "Cabinet", "Executive Orders"],
        "These all relate to the Executive Branch, which is responsible for implementing and enforcing federal laws.",
      ),
      group(
        ["Senate", "House", "Congress", "Legislature"],
        "These make up the Legislative Branch, which is responsible for making laws.",
      ),
      group(
        ["Supreme Court", "Federal Judge", "Chief Justice", "Judicial Review"],
        "These are part of the Judicial Branch, which interprets laws and determines if they are constitutional.",
      ),
    ],
    definitions: definitions(&[
      ("President", "Head of the Executive Branch and Commander in Chief"),
      ("Vice President", "Second in command of the Executive Branch, President of the Senate"),
      ("Cabinet", "Advisory body to the President, heads of federal departments"),
      ("Executive Orders", "Official directives from the President to federal agencies"),
      ("Senate", "Upper chamber of Congress, two senators per state"),
      ("House", "Lower chamber of Congress, representatives based on state population"),
      ("Congress", "Legislative body of the federal government"),
      ("Legislature", "Branch of government that makes laws"),
      ("Supreme Court", "Highest court in the federal judiciary"),
      ("Federal Judge", "Appointed judicial officer who resolves disputes"),
      ("Chief Justice", "Head of the Supreme Court and federal judiciary"),
      ("Judicial Review", "Power to determine if laws are constitutional"),
    ]),
  }
}

fn rights_and_freedoms() -> NewQuiz {
  NewQuiz {
    name: "Rights and Freedoms".into(),
    difficulty: "medium".into(),
    word_groups: vec![
      group(
        ["Speech", "Religion", "Press", "Assembly"],
        "These freedoms are protected by the First Amendment.",
      ),
      group(
        ["Jury Trial", "Attorney", "Speedy Trial", "Due Process"],
        "These protect people accused of a crime (Fifth and Sixth Amendments).",
      ),
      group(
        ["Thirteenth", "Fourteenth", "Fifteenth", "Nineteenth"],
        "These amendments abolished slavery, guaranteed equal protection, and expanded voting rights.",
      ),
      group(
        ["Bear Arms", "Quartering", "Search Warrant", "Cruel Punishment"],
        "These are protections from the Second, Third, Fourth and Eighth Amendments.",
      ),
    ],
    definitions: definitions(&[
      ("Speech", "Right to express opinions without government censorship"),
      ("Religion", "Right to practice any faith, or none"),
      ("Press", "Right to publish news and opinions"),
      ("Assembly", "Right to gather peacefully"),
      ("Jury Trial", "Case decided by a group of citizens"),
      ("Attorney", "Right to a lawyer when accused of a crime"),
      ("Speedy Trial", "Accused cannot be held indefinitely without trial"),
      ("Due Process", "Government must follow fair legal procedures"),
      ("Thirteenth", "Amendment that abolished slavery"),
      ("Fourteenth", "Amendment that guarantees equal protection of the laws"),
      ("Fifteenth", "Amendment that protects voting regardless of race"),
      ("Nineteenth", "Amendment that gave women the right to vote"),
      ("Bear Arms", "Right to keep and bear arms"),
      ("Quartering", "Soldiers cannot be housed in private homes in peacetime"),
      ("Search Warrant", "Protection against unreasonable searches"),
      ("Cruel Punishment", "Ban on cruel and unusual punishment"),
    ]),
  }
}

fn elections_and_voting() -> NewQuiz {
  NewQuiz {
    name: "Elections and Voting".into(),
    difficulty: "hard".into(),
    word_groups: vec![
      group(
        ["Primary", "Caucus", "Convention", "Nominee"],
        "These are steps parties use to choose their candidates.",
      ),
      group(
        ["Electoral College", "Elector", "Swing State", "270"],
        "These relate to how the President is formally elected.",
      ),
      group(
        ["Ballot", "Polling Place", "Absentee", "Registration"],
        "These are part of how a citizen actually casts a vote.",
      ),
    ],
    definitions: definitions(&[
      ("Primary", "Election where party members choose a candidate"),
      ("Caucus", "Meeting of party members to pick a candidate"),
      ("Convention", "Gathering where a party formally names its nominee"),
      ("Nominee", "Candidate chosen to represent a party"),
      ("Electoral College", "Body of electors that formally elects the President"),
      ("Elector", "Person who casts an electoral vote"),
      ("Swing State", "State where either party could win"),
      ("270", "Electoral votes needed to win the presidency"),
      ("Ballot", "Form used to record a vote"),
      ("Polling Place", "Location where votes are cast"),
      ("Absentee", "Voting by mail when unable to be present"),
      ("Registration", "Signing up so you are eligible to vote"),
    ]),
  }
}
