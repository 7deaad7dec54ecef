//! Card news content: categories of communities shown as Q&A pairs.

/// A single community, rendered as one question/answer pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Community {
    /// Shown as the question
    pub name: &'static str,
    /// Shown as the answer
    pub description: &'static str,
}

/// A named group of communities shown together on one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub communities: &'static [Community],
}

impl Category {
    /// Communities that fit on the page; the rest are dropped
    pub fn visible(&self, max: usize) -> &'static [Community] {
        &self.communities[..self.communities.len().min(max)]
    }
}

const fn community(name: &'static str, description: &'static str) -> Community {
    Community { name, description }
}

/// The card news set
pub static CATEGORIES: &[Category] = &[
    Category {
        name: "게임 & 놀이",
        communities: &[
            community("올콤보", "리듬게임을 좋아하는 사람들이 모여서 신나게 즐기는 시그예요!"),
            community("프사이", "스팀이나 에픽게임즈 같은 PC 게임을 같이 즐기고 꿀팁도 공유해요."),
            community("시그니처", "실내부터 야외까지, 다양한 레저 활동을 함께 즐기는 모임이에요."),
        ],
    },
    Category {
        name: "지적 탐구",
        communities: &[
            community("SIGMA", "수학, 논리, 철학, 물리 같은 주제로 재미있는 문제를 함께 풀어요."),
            community("GHQ", "역사와 지리에 대해 깊이 있는 정보를 나누고 토론하는 모임이에요."),
            community("밀덕", "군사, 전략, 밀리터리 역사에 푹 빠진 분들의 정보 교류 시그입니다."),
        ],
    },
    Category {
        name: "성장과 기회",
        communities: &[
            community("스타트업", "스타트업 창업자와 예비 창업자들이 모여 정보를 나누는 커뮤니티랍니다."),
            community("MIC", "주식, 부동산, 암호화폐처럼 돈 이야기에 관심 많은 분들의 투자 모임이에요."),
            community("모개인숲", "개발자 또는 개발 입문자들을 위한 세미나, 스터디, 프로젝트를 함께 해요."),
        ],
    },
    Category {
        name: "따뜻한 일상",
        communities: &[
            community("부모시그", "자녀 교육 정보나 육아 고민을 함께 나누는 모임이에요."),
            community("냥시그냥", "고양이를 사랑하는 집사님들이 모여서 친목을 다지는 곳이에요."),
            community("개판5분전", "강아지를 사랑하는 분들의 정보 공유는 물론, 유기견 기부도 함께 한답니다."),
        ],
    },
    Category {
        name: "🎤 열정과 참여",
        communities: &[
            community("사회이슈토론", "요즘 뜨거운 사회 이슈에 대해 진지하게 토론해보는 시그입니다."),
            community("블랙팝콘", "노래하는 걸 좋아하는 보컬 아티스트들이 모여 음악 활동도 하고 공모전도 나가요."),
            community("멋을UP", "헬스랑 운동에 진심인 사람들이 모여서 같이 득근하는 곳이에요!"),
        ],
    },
];
