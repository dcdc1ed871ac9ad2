use super::actor::{Actor, Context};
use super::board::TrackRemoval;
use super::player::PlayerId;
use super::policy::Policy;
use dialoguer::Input;

/// A line-based conversation with the person controlling a seat.
pub trait Prompt: Send {
    /// Shows a message.
    fn tell(&mut self, msg: &str);
    /// Asks a question and waits for an answer; `None` once input has closed.
    fn ask(&mut self, question: &str) -> Option<String>;
}

/// Talks to the terminal.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsolePrompt;

impl Prompt for ConsolePrompt {
    fn tell(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn ask(&mut self, question: &str) -> Option<String> {
        Input::<String>::new().with_prompt(question).interact_text().ok()
    }
}

/// A seat controlled by a person.
///
/// Invalid answers are rejected and the question repeated.
/// If input closes, the first option is taken.
pub struct HumanPlayer {
    prompt: Box<dyn Prompt>,
}

impl HumanPlayer {
    pub fn new(prompt: Box<dyn Prompt>) -> Self {
        Self { prompt }
    }

    pub fn console() -> Self {
        Self::new(Box::new(ConsolePrompt))
    }

    /// Asks for a number in `0..count`.
    fn choose_index(&mut self, question: &str, count: usize) -> usize {
        loop {
            let Some(answer) = self.prompt.ask(question) else {
                log::warn!("Input closed, taking the first option for: {}", question);
                return 0;
            };
            match answer.trim().parse::<usize>() {
                Ok(idx) if idx < count => return idx,
                Ok(_) => self.prompt.tell(&format!("Choose a number from 0 to {}", count.saturating_sub(1))),
                Err(_) => self.prompt.tell("Please enter a number"),
            }
        }
    }

    fn choose_player(&mut self, ctx: &Context<'_>, question: &str, eligible: &[PlayerId]) -> PlayerId {
        let options = eligible
            .iter()
            .enumerate()
            .map(|(idx, id)| {
                let name = ctx.player(*id).map(|p| p.name.as_str()).unwrap_or("?");
                format!("  [{}] {}", idx, name)
            })
            .collect::<Vec<_>>()
            .join("\n");
        self.prompt.tell(&options);
        let idx = self.choose_index(question, eligible.len());
        eligible.get(idx).copied().unwrap_or_default()
    }

    fn choose_policy_index(&mut self, question: &str, policies: &[Policy]) -> usize {
        let options = policies
            .iter()
            .enumerate()
            .map(|(idx, policy)| format!("  [{}] {}", idx, policy))
            .collect::<Vec<_>>()
            .join("\n");
        self.prompt.tell(&options);
        self.choose_index(question, policies.len())
    }

    fn yes_no(&mut self, question: &str) -> bool {
        loop {
            let Some(answer) = self.prompt.ask(&format!("{} (y/n)", question)) else {
                log::warn!("Input closed, answering no to: {}", question);
                return false;
            };
            match answer.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" | "ja" => return true,
                "n" | "no" | "nein" => return false,
                _ => self.prompt.tell("Please answer y or n"),
            }
        }
    }

    fn show_hand(&mut self, ctx: &Context<'_>) {
        let me = ctx.me;
        self.prompt.tell(&format!(
            "{}, you are {}. Tracks: liberal {}/{}, fascist {}/{}, communist {}/{}",
            me.name,
            me.role,
            ctx.board.liberal_track,
            ctx.board.liberal_track_size,
            ctx.board.fascist_track,
            ctx.board.fascist_track_size,
            ctx.board.communist_track,
            ctx.board.communist_track_size,
        ));
    }
}

impl Actor for HumanPlayer {
    fn is_bot(&self) -> bool {
        false
    }

    fn nominate_chancellor(&mut self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        self.show_hand(ctx);
        self.choose_player(ctx, "Nominate a chancellor", eligible)
    }

    fn filter_policies(&mut self, _ctx: &mut Context<'_>, policies: &[Policy]) -> usize {
        self.choose_policy_index("Choose a policy to discard", policies)
    }

    fn choose_policy(&mut self, _ctx: &mut Context<'_>, policies: &[Policy]) -> usize {
        self.choose_policy_index("Choose a policy to enact", policies)
    }

    fn vote(&mut self, ctx: &mut Context<'_>, president: PlayerId, chancellor: PlayerId) -> bool {
        let name = |id| ctx.player(id).map(|p| p.name.clone()).unwrap_or_default();
        let question = format!("Vote for president {} and chancellor {}?", name(president), name(chancellor));
        self.yes_no(&question)
    }

    fn veto(&mut self, _ctx: &mut Context<'_>, policies: &[Policy]) -> bool {
        self.prompt.tell(&format!("Your hand: {:?}", policies));
        self.yes_no("Propose a veto?")
    }

    fn accept_veto(&mut self, _ctx: &mut Context<'_>, policies: &[Policy]) -> bool {
        self.prompt.tell(&format!("The chancellor wants to veto {:?}", policies));
        self.yes_no("Accept the veto?")
    }

    fn view_policies(&mut self, _ctx: &mut Context<'_>, policies: &[Policy]) {
        self.prompt.tell(&format!("The top of the deck: {:?}", policies));
    }

    fn kill(&mut self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        self.choose_player(ctx, "Choose a player to execute", eligible)
    }

    fn choose_player_to_mark(&mut self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        self.choose_player(ctx, "Choose a player to mark for execution", eligible)
    }

    fn inspect_player(&mut self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        self.choose_player(ctx, "Choose a player to investigate", eligible)
    }

    fn choose_next(&mut self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        self.choose_player(ctx, "Choose the next president", eligible)
    }

    fn choose_player_to_radicalize(&mut self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        self.choose_player(ctx, "Choose a player to radicalize", eligible)
    }

    fn choose_player_to_bug(&mut self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        self.choose_player(ctx, "Choose a player to bug", eligible)
    }

    fn propaganda_decision(&mut self, _ctx: &mut Context<'_>, policy: Policy) -> bool {
        self.prompt.tell(&format!("The top policy is {}", policy));
        self.yes_no("Discard it?")
    }

    fn choose_revealer(&mut self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        self.choose_player(ctx, "Choose who sees the chancellor's party", eligible)
    }

    fn social_democratic_removal_choice(&mut self, _ctx: &mut Context<'_>) -> TrackRemoval {
        self.prompt.tell("  [0] fascist\n  [1] communist");
        match self.choose_index("Remove a policy from which track?", 2) {
            0 => TrackRemoval::Fascist,
            _ => TrackRemoval::Communist,
        }
    }

    fn pardon_player(&mut self, ctx: &mut Context<'_>) -> bool {
        let Some(marked) = ctx.state.marked_for_execution else {
            return false;
        };
        let name = ctx.player(marked).map(|p| p.name.clone()).unwrap_or_default();
        self.yes_no(&format!("Pardon {}?", name))
    }

    fn vote_of_no_confidence(&mut self, ctx: &mut Context<'_>) -> bool {
        let Some(policy) = ctx.state.last_discarded else {
            return false;
        };
        self.yes_no(&format!("Enact the discarded {} policy?", policy))
    }
}
