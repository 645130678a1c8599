//! The built-in template catalog.
//!
//! Each entry declares its asset, caption geometry and the few-shot examples
//! the selection model sees. Slot coordinates are in pixels of the template's
//! own asset. Registration order here is the order `TemplateRegistry::all`
//! reports.

use crate::template::{CaptionSlot, MemeTemplate};

/// Column wrap applied to captions on animated templates before canvas fitting.
const GIF_WRAP_COLUMNS: usize = 40;
/// Right-edge padding for canvas-fitted captions on animated templates.
const GIF_FIT_PADDING: u32 = 10;

/// All built-in templates in registration order.
pub fn builtin_templates() -> Vec<MemeTemplate> {
    vec![
        change_my_mind(),
        equal(),
        indifferent(),
        ineffective_solution(),
        no_responsibility(),
        guy_chilling(),
        bike_fall(),
        thinking_about_other_women(),
        angry_jethalal_beating_goli(),
        disappointed_fan(),
        bored(),
        confused(),
        unintended_damage(),
        sad_pablo(),
        mujhe_ghar_jaana_hai(),
        jethalal_angry(),
        buff_doge_vs_cheems(),
        dhol_rajpal_yadav(),
    ]
}

fn gif_caption(field: &str, x: i32, y: i32, font_size: f32) -> CaptionSlot {
    CaptionSlot::new(field, x, y, font_size)
        .white()
        .wrap(GIF_WRAP_COLUMNS)
        .fit_to_canvas(GIF_FIT_PADDING)
}

fn change_my_mind() -> MemeTemplate {
    MemeTemplate::still(10, "Change_My_Mind", "This is the way it is in my opinion", "jpg")
        .slot(CaptionSlot::new("opinion", 500, 385, 30.0).wrap(22).rotate(20.0))
        .examples(
            r#" Here are a few examples of input output
###
context:Chocolate chip cookies are the best cookies. Try to change my mind.
meme_creation_input:{"opinion":"Chocolate chip cookies are the best cookies."}
###
context:Learning to code is one of the most rewarding experiences. Change my mind.
meme_creation_input:{"opinion":"Learning to code is one of the most rewarding experiences."}
###
context:Daft Punk is the greatest electronic band to ever exist and you cant convince me otherwise.
meme_creation_input:{"opinion":"Daft Punk is the greatest electronic band to ever exist."}
###
context:In my opinion, the best way to get a good grade in school is to study hard.
meme_creation_input:{"opinion":"The best way to get a good grade in school is to study hard."}
###
"#,
        )
}

fn equal() -> MemeTemplate {
    MemeTemplate::still(12, "Equal", "something is the same as something else", "jpg")
        .slot(CaptionSlot::new("first", 70, 180, 45.0).wrap(12).rotate(345.0))
        .slot(CaptionSlot::new("second", 575, 100, 45.0).wrap(12).rotate(345.0))
        .examples(
            r#" Here are a few examples of input output
###
context:Tea and coffee are equally good. They both make me happy
meme_creation_input:{"first":"Tea", "second":"coffee"}
###
context:Both Dr. Dre and Kanye are amazing. I love them both
meme_creation_input:{"first":"Dr. Dre", "second":"Kanye"}
###
context:If I had to decide between Honda and Tesla I couldnt. They are both great.
meme_creation_input:{"first":"Honda", "second":"Tesla"}
###
context:Riding a bike on dirt is just as fun as riding on the street
meme_creation_input:{"first":"riding a bike on the dirt","second":"riding a bike on the street"}
###
context:Surfing in warm water is the same as surfing in cold water. They are equally fun
meme_creation_input:{"first":"surfing in cold water","second":"surfing in warm water"}
###
"#,
        )
}

fn indifferent() -> MemeTemplate {
    MemeTemplate::still(
        2,
        "Indifferent",
        "here is a guy who is burning a fact that he does not want to acknowledge because it is too painful",
        "jpg",
    )
    .slot(CaptionSlot::new("action", 100, 175, 40.0).wrap(11))
    .examples(
        r#" Here are a few examples of input output
###
context:Doesnt matter that people might elect someone stupid that will affect us all
meme_creation_input:{"action":"People might elect someone stupid"}
###
context:You will never be good enough to beat the indian cricket team
meme_creation_input:{"action":"You will never be good enough to beat the indian cricket team"}
###
context:Mavericks are unbeatable at their home ground.
meme_creation_input:{"action":"Mavericks are unbeatable at their home ground"}
###
context:We should all wear sunscreen, but some people dont seem to care
meme_creation_input:{"action":"wearing sunscreen"}
###
context:Getting patents is sometimes important, but sometimes it is not at all
meme_creation_input:{"action":"Getting patents is sometimes important"}
###
context:Make sure to always write tests before writing code
meme_creation_input:{"action":"writing tests before writing code"}
###
"#,
    )
}

fn ineffective_solution() -> MemeTemplate {
    MemeTemplate::still(9, "Ineffective_Solution", "the solution was a poor way of doing it", "jpg")
        .slot(CaptionSlot::new("attempted_solution", 75, 75, 50.0).white().wrap(14))
        .slot(
            CaptionSlot::new("failure", 125, 725, 50.0)
                .white()
                .wrap(15)
                .rotate(350.0),
        )
        .examples(
            r#" Here are a few examples of input output
###
context:There is a bunch of traffic in town. The government decided to make the roads wider, but that's not the problem
meme_creation_input:{"attempted_solution":"more roads", "failure":"traffic"}
###
context:Some people who brush their hair still get messy hair.
meme_creation_input:{"attempted_solution":"brush", "failure":"messy hair"}
###
context:I go for a walk daily, but then I end up eating a donut. Pretty ineffective
meme_creation_input:{"attempted_solution":"walk daily", "failure":"eating a donut"}
###
context:I drink coffee to be more awake, but then I cant sleep and I am tired the next day
meme_creation_input:{"attempted_solution":"drink coffee", "failure":"cant sleep and I am tired the next day"}
###
context:I try to read a book to spend less time on my phone, but I end up googling concepts on my phone
meme_creation_input:{"attempted_solution":"read a book to spend less time on my phone", "failure":"end up googling concepts on my phone"}
###
context:I wish AI could help me make memes
meme_creation_input:{"attempted_solution":"AI making memes", "failure":"The memes are beyond my sense of humor"}
###
"#,
        )
}

fn no_responsibility() -> MemeTemplate {
    MemeTemplate::still(8, "No_Responsibility", "two parties blaming each other for something", "jpg")
        .slot(CaptionSlot::new("party_one", 175, 200, 40.0).white().wrap(12))
        .slot(CaptionSlot::new("party_two", 800, 200, 40.0).white().wrap(12))
        .examples(
            r#" Here are a few examples of input output
###
context:The batting could have saved team A but their bowlers let them down. Dont know who to blame
meme_creation_input:{"party_one":"team a batting", "party_two":"team a bowling"}
###
context:The shoemaker blames the sockmaker and the sockmaker blames the shoemaker
meme_creation_input:{"party_one":"shoemaker", "party_two":"sockmaker"}
###
context:Coffee blames tea for not waking me up after I drink both
meme_creation_input:{"party_one":"coffee", "party_two":"tea"}
###
context:I cant do anything useful
meme_creation_input:{"party_one":"me", "party_two":"me"}
###
context:the whole team let the fans down. the defenders and attackers
meme_creation_input:{"party_one":"Team defence", "party_two":"Team attack"}
###
"#,
        )
}

fn guy_chilling() -> MemeTemplate {
    MemeTemplate::still(38, "Guy_Chilling", "Team or player relaxing with confidence", "jpg")
        .slot(CaptionSlot::new("opinion", 50, 450, 30.0).white().wrap(40))
        .examples(
            r#" Here are a few examples of input output
###
context:India having set a huge target and already have the opponents batsmen bowled out and now rohit sharma the captain is allowing virat kohli to bowl a few overs.
meme_creation_input:{"opinion":"Rohit enjoying virat bowling a few overs."}
###
context:A group of friends are playing a board game, and one person makes a brilliant move to win, but instead of bragging about it, they just smile and say "Good game, everyone."
meme_creation_input:{"opinion":"When you know youre right but dont want to rub it in"}
###
context:A group of coworkers are scrambling to finish a project before a deadline, but one coworker is calmly working away, sipping their coffee and not letting the stress get to them.
meme_creation_input:{"opinion":"Just chillin while everyone else is stressing."}
###
context:A student has just finished an important exam, and they walk out of the classroom with a smile on their face, knowing that they aced it.
meme_creation_input:{"opinion":"The face of someone who knows theyve already won."}
###
"#,
        )
}

fn bike_fall() -> MemeTemplate {
    MemeTemplate::still(13, "Bike_Fall", "You yourself are the reason for your failure", "jpg")
        .slot(CaptionSlot::new("first", 250, 100, 25.0).wrap(20))
        .slot(CaptionSlot::new("second", 40, 350, 25.0).wrap(20))
        .slot(CaptionSlot::new("third", 250, 500, 25.0).wrap(20))
        .examples(
            r#" Here are a few examples of input output
###
context: In recent news a School is found to suspend kids who defends himself from bullies rather than suspending the bullies. In interview, it asks people why does everyone hates us?
meme_creation_input:{"first":"We prevent bullying.",  "second": "Suspends kids who defended themselves.", "third": "why does everyone hates us?"}
###
context: India vs new zealand test match. Weather conditions are overcast, windy and rainy. India wins the toss and elects to bat first. India is then all out for mere 46 runs.
meme_creation_input:{"first":"भारत ने टॉस जीता", "second": "भारत ने बादल छाए रहने की स्थिति में पहले बल्लेबाजी करने का फैसला किया", "third":"46 पर ढेर"}
###
context:India vs Sri Lanka test match. India is playing really well and is about to win the match. Just then the set batsmen Rishabh Pant tries to hit a big shot and is caught out. Then whole Indian batting collapses and India loses the match.
meme_creation_input:{"first":"India is playing really well", "second": "Rishabh Pant goes for a biggie and is caught out", "third":"India loses"}
###
context: I was waiting for the weekend to come and had planned to do a lot of things. Saturday comes and I am too tired to do anything. Sunday comes and I am too lazy to do anything. Monday comes and I am too busy to do anything."
meme_creation_input:{"first": "Saturday", "second": "Sunday", "third":"Monday"}
###
"#,
        )
}

fn thinking_about_other_women() -> MemeTemplate {
    MemeTemplate::still(
        21,
        "Thinking_About_Other_Women",
        "the man is not talking to his wife because he is thinking. she thinks its about other women, but he is disturbed by other thoughts.",
        "png",
    )
    .slot(CaptionSlot::new("thoughts", 650, 15, 25.0).wrap(20))
    .examples(
        r#" Here are a few examples of input output
###
context: India vs New Zealand test match. Virat Kohli got out for a duck in the first innings. He is a very good player and got out for a duck which was unexpected.
meme_creation_input:{"thoughts":"Why did I pick Virat Kohli for my fantasy team??""}
###
context: Man and woman are sleeping together. Woman is thinking suspicious about man whereas the man is thinking about some food that he had in the evening and is regretting on the decision.
meme_creation_input:{"thoughts":"Why did I eat that entire pizza by myself?"}
###
context: There was match between FC Barcelona and Real Madrid. Araujo of FC Barcelona was naive and silly and made a foul on Bellingham which resulted in him getting a red card and eventually a lose for FC Barcelona. It was a very silly decision by Araujo.
meme_creation_input:{"thoughts":"Why did Araujo make that silly foul?"}
###
context: There was a match between India and Australia World Cup Final 2023. Rohit Sharma was playing really well and had already hit a six in the over. He then tried to hit another big shot but was caught out. It was a very silly decision by Rohit Sharma. He should have played more carefully.
meme_creation_input:{"thoughts":"Why did Rohit Sharma tried to hit another six?"}
###
"#,
    )
}

fn angry_jethalal_beating_goli() -> MemeTemplate {
    MemeTemplate::animated(
        29,
        "Angry_Jethalal_Beating_Goli",
        "Person A beating Person B for his silly mistake",
    )
    .slot(gif_caption("depiction", 50, 250, 30.0))
    .examples(
        r#" Here are a few examples of input output
###
context:Ind vs Aus ODI big match. India lost some early wickets. Hardik Pandya went to bat and got out on the very first ball. He was expected to play a big inning but got out playing silly big shot and got caught.
meme_creation_input:{"depiction":"Scenes in dressing room."}
###
context:There was match between FC Barcelona and Real Madrid. Araujo of FC Barcelona was naive and silly and made a foul on Bellingham which resulted in him getting a red card and eventually a lose for FC Barcelona. It was a very silly decision by Araujo.
meme_creation_input:{"depiction":"Scenes in post match talk between Araujo and coach"}
###
context:There was a educational drive to reduce cases of organization secrets being leaked by using plain text passwords. CTO had repeatly warned a specific employee to not repeat this mistake. But employee was careless and did it again.
meme_creation_input:{"depiction":"Scenes in review meeting"}
###
"#,
    )
}

fn disappointed_fan() -> MemeTemplate {
    MemeTemplate::still(
        32,
        "disappointed-pak-fan",
        "This is the face of disappointment when expectations fail.",
        "jpg",
    )
    .slot(CaptionSlot::new("opinion", 120, 385, 50.0).white().wrap(40))
    .examples(
        r#" Here are a few examples of input output
###
context:Pakistan lost the match.
meme_creation_input:{"opinion":"Pakistan lost the match."}
###
context:You were promised pizza, but all thats left is salad.
meme_creation_input:{"opinion":"You were promised pizza, but all thats left is salad."}
###
context:You spent hours learning to code, but the program still doesn’t work.
meme_creation_input:{"opinion":"You spent hours learning to code, but the program still doesn’t work."}
###
context:Your favorite show was cancelled after the best season.
meme_creation_input:{"opinion":"Your favorite show was cancelled after the best season."}
###
"#,
    )
}

fn bored() -> MemeTemplate {
    MemeTemplate::still(
        61,
        "sarfaraz-khan-yawning",
        "This meme shows a bored or uninterested expression",
        "jpeg",
    )
    .slot(CaptionSlot::new("caption", 10, 50, 15.0).wrap(20))
    .examples(
        r#" Here are a few examples of input-output pairs for this meme template
###
context:When the meeting is going on for hours and nothing productive is happening.
meme_creation_input:{"caption":"When the meeting is going on for hours and nothing productive is happening."}
###
context:My reaction when someone explains something I already know.
meme_creation_input:{"caption":"My reaction when someone explains something I already know."}
###
context:When you realize you forgot to charge your phone, and now you are stuck without it.
meme_creation_input:{"caption":"When you realize you forgot to charge your phone, and now you are stuck without it."}
###
"#,
    )
}

fn confused() -> MemeTemplate {
    MemeTemplate::still(
        15,
        "rohit_conf",
        "This meme shows a confused or perplexed expression - when it just goes over your head what happened",
        "png",
    )
    .slot(CaptionSlot::new("caption", 75, 200, 100.0).wrap(30))
    .examples(
        r#" Here are a few examples of input-output pairs for this meme template
###
context:When the code runs but you have no idea why it worked.
meme_creation_input:{"caption":"When the code runs but you have no idea why it worked."}
###
context:When you thought you understood the assignment, but the results say otherwise.
meme_creation_input:{"caption":"When you thought you understood the assignment, but the results say otherwise."}
###
context: Exceptional performance by alonso but even his 3 goals could not save the team from a loss
meme_creation_input:{"caption":"when you score 3 goals and loose"}
###
context: It is hard to see why the coach would select A over B to go out to play in these conditions
meme_creation_input:{"caption":"fans looking at coach sending A over B"}
###
"#,
    )
}

fn unintended_damage() -> MemeTemplate {
    MemeTemplate::still(
        50,
        "mujhe-kyu-toda",
        "Used when someone is destroyed and thrashed without it being their fault",
        "jpeg",
    )
    .slot(CaptionSlot::new("who", 10, 150, 15.0).white().wrap(35))
    .examples(
        r#" Here are a few examples of input-output pairs for this meme template
###
context:When someone spills a drink on your laptop and now it wont turn on.
meme_creation_input:{"who":"My laptop"}
###
context:When you let your friend borrow your car, and they return it with a dent.
meme_creation_input:{"who":"My car"}
###
context:When you innocently bump into the bookshelf, and the whole thing collapses.
meme_creation_input:{"who":"Me"}
###
context:netherlands were peacefully exiting the world cup after defeating the defending champions but then they were thrashed by India badly who did not even need the win
meme_creation_input:{"who":"Netherlands after the match"}
###
"#,
    )
}

fn sad_pablo() -> MemeTemplate {
    MemeTemplate::still(
        18,
        "Sad-Pablo-Escobar",
        "This meme expresses the sadness and boredom associated with anticipation or waiting",
        "jpg",
    )
    .slot(CaptionSlot::new("caption", 50, 50, 30.0).white().wrap(30))
    .examples(
        r#" Here are a few examples of input-output pairs for this meme template
###
context:When you re waiting for your food to arrive but it s been an hour already.
meme_creation_input:{"caption":"When you re waiting for your food to arrive but it s been an hour already."}
###
context:When you send someone a message and they don t respond for hours.
meme_creation_input:{"caption":"When you send someone a message and they don t respond for hours."}
###
context:When the weekend is almost over and you realize you didn t do anything fun.
meme_creation_input:{"caption":"When the weekend is almost over and you realize you didn t do anything fun."}
###
"#,
    )
}

fn mujhe_ghar_jaana_hai() -> MemeTemplate {
    MemeTemplate::still(
        23,
        "Mujhe_Ghar_Jaana_Hai",
        "Somebody is clearly traumatized and wants to go home",
        "png",
    )
    .slot(CaptionSlot::new("who", 100, 115, 100.0).white().wrap(40))
    .examples(
        r#" Here are a few examples of input output
###
context:The mavericks fans had a horrible day today. They lost the game badly.
meme_creation_input:{"who":"Mavericks fans"}
###
context: Everything went wrong for John today in the meeting - he just wanted to leave
meme_creation_input:{"who":"John today"}
###
context:The captain was let down by shamis performance today
meme_creation_input:{"who":"the captain today seeing shamis bowling"}
###
context: Frances defenders seeing the speed of messi
meme_creation_input:{"who":"Frances defenders seeing the speed of messi"}
###
"#,
    )
}

fn jethalal_angry() -> MemeTemplate {
    MemeTemplate::animated(42, "Jethalal_Angry", "Someone is really angry with what happened")
        .slot(gif_caption("who", 50, 300, 30.0))
        .examples(
            r#" Here are a few examples of input output
###
context:The coach pep has to be angry with his attackers performance today
meme_creation_input:{"who":"Pep looking at his attackers"}
###
context: That was wrong. marcelo was not out and the umpire gave him out. surely he is going to be angry
meme_creation_input:{"who":"Marcello after the umpire gave him out wrongly"}
###
context: that lineup does not make sense. How could the coach not be playing spencer? surely this will hurt the team
meme_creation_input:{"who":"Indian fans after seeing the lineup"}
###
context: The dugout must be getting crazy because hardik was told to play slow but he is clearly in no mood and is hitting the ball hard
meme_creation_input:{"who":"The dugout after hardik starts hitting the ball hard"}
###
"#,
        )
}

fn buff_doge_vs_cheems() -> MemeTemplate {
    MemeTemplate::still(
        14,
        "Buff_Doge_vs_cheems",
        "when someone is strong in one area but comically weak in another",
        "jpg",
    )
    .slot(CaptionSlot::new("strong", 70, 180, 45.0).wrap(12).rotate(345.0))
    .slot(CaptionSlot::new("weak", 575, 100, 45.0).wrap(12).rotate(345.0))
    .examples(
        r#" Here are a few examples of input output
###
context:Jim does well in the gym, but he is a small whimpering figure in front of his crush
meme_creation_input:{"strong":"Jim in the gym", "weak":"Jim in front of crush"}
###
context:The lakers do well at home but fail miserably away from home
meme_creation_input:{"strong":"Lakers at home", "weak":"Lakers away from home"}
###
context:The australian team is strong in the field but weak in bowling
meme_creation_input:{"strong":"Australian team when fielding", "weak":"Australian team when bowling"}
###
context:In the first half manchester united were very strong and had most of the possession but in the second half they were weak and conceded a goal
meme_creation_input:{"strong":"Manchester united in the first half", "weak":"Manchester united in the second half"}
###
"#,
    )
}

fn dhol_rajpal_yadav() -> MemeTemplate {
    MemeTemplate::animated(
        31,
        "Dhol_Rajpal_Yadav",
        "An overconfident person celebrating the win after doing nothing",
    )
    .slot(gif_caption("depiction", 40, 330, 20.0))
    .examples(
        r#" Here are a few examples of input output
###
context:Ind vs Aus ODI big match. India lost some early wickets. Hardik Pandya went to bat and got out on the very first ball. He was expected to play a big inning but got out playing silly big shot and got caught.
meme_creation_input:{"depiction":"Hardik Pandya the next day"}
###
context:Ind vs South Africa T20 Final match. India won the match after close competition. The players who played well were celebrating. But there was one player yuzvendra chahal who was on bench but was celebrating as if he single handedly won the match.
meme_creation_input:{"depiction":"Yuzvendra Chahal after the match"}
###
context:In office meeting, the team was celebrating success about the new project. There was this manager Ved Prakash of the team who contributed nothing and was yet celebrating like he did all the hard work.
meme_creation_input:{"depiction":"Ved Prakash during the celebration of the new project"}
###
"#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::AssetKind;
    use crate::validate::validate_templates;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let templates = builtin_templates();
        assert_eq!(templates.len(), 18);
        assert!(validate_templates(&templates).is_ok());
    }

    #[test]
    fn test_registration_order() {
        let ids: Vec<u32> = builtin_templates().iter().map(|t| t.id).collect();
        assert_eq!(
            ids,
            vec![10, 12, 2, 9, 8, 38, 13, 21, 29, 32, 61, 15, 50, 18, 23, 42, 14, 31]
        );
    }

    #[test]
    fn test_animated_templates_have_one_fitted_slot() {
        for template in builtin_templates()
            .into_iter()
            .filter(|t| t.asset_kind == AssetKind::AnimatedGif)
        {
            assert_eq!(template.asset_extension, "gif");
            assert_eq!(template.caption_slots.len(), 1, "template {}", template.id);
            assert_eq!(template.caption_slots[0].fit_padding, Some(GIF_FIT_PADDING));
        }
    }

    #[test]
    fn test_examples_mention_every_caption_key() {
        for template in builtin_templates() {
            for field in template.field_names() {
                assert!(
                    template.prompt_examples.contains(&format!("\"{}\"", field)),
                    "template {} examples never show key '{}'",
                    template.id,
                    field
                );
            }
        }
    }
}
