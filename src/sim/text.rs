//! Static text pools
//!
//! Display-only content. Gameplay only cares about which pool a line came from.

use super::state::Category;

pub const NICKS: &[&str] = &[
    "새벽감자",
    "숲속다람쥐",
    "치즈냥",
    "고인물123",
    "퇴근하고싶다",
    "라면한그릇",
    "방구석코치",
    "눈팅전문",
    "오늘도출석",
    "별빛여우",
    "도토리부자",
    "초보시청자",
    "야식러",
    "랜덤박스",
];

pub const NORMAL_TEXTS: &[&str] = &[
    "ㅋㅋㅋㅋㅋ",
    "안녕하세요!",
    "오늘 방송 재밌네요",
    "방금 그거 대박",
    "ㅇㅈ",
    "화이팅!!",
    "목소리 좋다",
    "브금 뭐예요?",
    "오 나이스",
    "처음 왔어요 반가워요",
    "와 그걸 피하네",
    "다음 판도 가보자",
    "밥 먹고 왔습니다",
    "오늘 컨디션 좋아보여요",
];

pub const LONG_TEXTS: &[&str] = &[
    "아니 근데 제가 예전부터 느낀건데 이 게임은 처음부터 설계가 잘못돼서 지금 이렇게 하는 건 의미가 없고 결국 다 갈아엎어야 한다고 봅니다 진짜로요",
    "제가 어제 잠을 못 자서 그런데 들어보세요 아침에 일어났는데 고양이가 키보드를 밟아서 보고서가 다 날아갔고 그래서 오늘 하루가 망했습니다",
    "스트리머님 혹시 제 얘기 좀 들어주실 수 있나요 제 친구가 있는데 그 친구가 말이죠 아주 긴 이야기인데 일단 처음부터 설명하자면",
    "요즘 방송들 보면 다 똑같은 것만 하고 새로운 건 하나도 없고 시청자 의견은 듣지도 않고 그냥 자기 하고 싶은 것만 하는 것 같아요",
];

pub const COACH_TEXTS: &[&str] = &[
    "그거 아니고 왼쪽으로 가야죠",
    "아 답답하네 제가 해도 그거보단 잘함",
    "세팅부터 다시 하세요",
    "거기서 그걸 왜 써요?",
    "템트리 완전 틀렸음",
    "제 말대로만 하면 이깁니다",
];

pub const DIVERT_TEXTS: &[&str] = &[
    "근데 다른 방송은 지금 뭐함?",
    "게임 말고 노래 불러주세요",
    "그 얘기 말고 어제 그 사건 어떻게 생각함?",
    "옆 방송이 더 재밌던데",
    "주제 바꾸죠 연애썰 풀어주세요",
    "아무도 안 궁금한데 제 점심 메뉴는요",
];

pub const KEYWORD_TEXTS: &[&str] = &[
    "[민감 키워드] 얘기 좀 해봐요",
    "스트리머님 정치 성향 뭐예요?",
    "[민감 키워드] 지지하시죠?",
    "이번 선거 누구 뽑음?",
    "[금지어] 관련해서 한마디만",
];

pub const COMMUNITY_TEXTS: &[&str] = &[
    "○○갤에서 왔습니다 ㅋㅋ",
    "우리 커뮤에서 다 보고 있음",
    "단체로 왔다 도배 시작",
    "○○ 커뮤니티 만세",
    "링크 타고 왔어요 여기가 그 방송?",
];

pub const SUBTITLES_CALM: &[&str] = &[
    "오늘 채팅 분위기 좋네요~",
    "천천히 하나씩 봐볼게요",
    "다들 반가워요!",
    "이 정도면 평화롭네",
];

pub const SUBTITLES_ANGRY: &[&str] = &[
    "아니 채팅 왜 이래요",
    "매니저님 일 좀 해주세요...",
    "조금만 진정합시다",
    "하... 또 시작이네",
];

pub const SUBTITLES_TIRED: &[&str] = &[
    "좀 지치네요...",
    "오늘 채팅 힘들다",
    "물 좀 마시고 올게요",
    "버텨보자...",
];

pub const SUBTITLES_WARNING: &[&str] = &[
    "더는 못 버티겠어요...",
    "방송 접을까...",
    "매니저님 제발...",
];

pub const SUBTITLES_PRAISE: &[&str] = &[
    "매니저님 폼 미쳤다",
    "채팅 깔끔하다!",
    "역시 우리 매니저",
    "오늘 관리 완벽하네요",
];

/// Subtitle shown before the first refresh
pub const SUBTITLE_READY: &str = "준비...";

/// Suffix appended by the stage-four escalation twist
pub const ESCALATION_SUFFIX: &str = " (…)";

/// Message text pool for a category
pub fn texts_for(category: Category) -> &'static [&'static str] {
    match category {
        Category::Ordinary => NORMAL_TEXTS,
        Category::LongForm => LONG_TEXTS,
        Category::Advice => COACH_TEXTS,
        Category::Deflection => DIVERT_TEXTS,
        Category::Keyword => KEYWORD_TEXTS,
        Category::Brigade => COMMUNITY_TEXTS,
    }
}
