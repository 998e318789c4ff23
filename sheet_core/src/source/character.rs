//! Characters carry their own proficiency bonus and Jack of All Trades flag

use crate::derived::CreatureInput;
use crate::records::Character;
use crate::source::StatSource;

impl StatSource for Character {
    fn id(&self) -> &str {
        &self.creature.name
    }

    fn creature_input(&self) -> CreatureInput {
        CreatureInput::from_creature(&self.creature, self.proficiency_bonus)
            .with_jack_of_all_trades(self.is_jack_of_all_trades)
    }
}
